//! MCP tool handlers for the course assistant server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::error::SearchError;
use crate::search::ScoredResult;
use crate::services::CourseService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server that exposes course content search to AI assistants.
#[derive(Clone)]
pub struct CourseAssistantServer {
    course_service: Arc<dyn CourseService>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for CourseAssistantServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "course-assistant-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for a weekly retail-training course - finds relevant lesson resources for a learner's question, browses weeks, and checks content quality.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchCourseContentParams {
    query: String,
    #[serde(default)]
    week: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FindRelatedResourcesParams {
    url: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct WeekParams {
    week: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NoParams {}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Caller mistakes become INVALID_PARAMS, everything else INTERNAL_ERROR.
fn search_error_to_mcp(e: SearchError) -> McpError {
    match e {
        SearchError::InvalidParameters(_) | SearchError::NotFound(_) => McpError {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::from(e.to_string()),
            data: None,
        },
        other => to_mcp_error(other),
    }
}

fn results_json(results: &[ScoredResult]) -> Vec<serde_json::Value> {
    results
        .iter()
        .map(|r| {
            serde_json::json!({
                "score": r.score,
                "resource": r.resource.as_ref(),
            })
        })
        .collect()
}

fn json_result(value: &serde_json::Value) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

// Tool router implementation
#[tool_router]
impl CourseAssistantServer {
    /// Create a new course assistant server.
    pub fn new(course_service: Arc<dyn CourseService>) -> Self {
        Self {
            course_service,
            tool_router: Self::tool_router(),
        }
    }

    /// Search course resources relevant to a question.
    #[tool(
        description = "Search the course's learning resources (articles, videos, documents) for a free-text question. Returns the best matching resources ranked by relevance, optionally limited to one week."
    )]
    async fn search_course_content(
        &self,
        params: Parameters<SearchCourseContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let results = self
            .course_service
            .search_resources(params.query.clone(), params.week)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({
            "query": params.query,
            "week": params.week,
            "result_count": results.len(),
            "results": results_json(&results),
        }))
    }

    /// Find resources related to a given resource.
    #[tool(
        description = "Find supplementary course resources related to the resource with the given URL. The resource itself is never included."
    )]
    async fn find_related_resources(
        &self,
        params: Parameters<FindRelatedResourcesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let related = self
            .course_service
            .related_resources(params.url)
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({
            "source": related.source.as_ref(),
            "result_count": related.related.len(),
            "results": results_json(&related.related),
        }))
    }

    /// Summarize a week of the course.
    #[tool(
        description = "Get an overview of one course week: title, description, and for each day the activity, bellringer question and resource titles"
    )]
    async fn get_week_overview(
        &self,
        params: Parameters<WeekParams>,
    ) -> Result<CallToolResult, McpError> {
        let overview = self
            .course_service
            .week_overview(params.0.week)
            .await
            .map_err(search_error_to_mcp)?;

        let json_response = serde_json::to_string_pretty(&overview).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Check course content quality.
    #[tool(
        description = "Validate the course content (required fields, resource URLs, description length, key takeaways, bellringers, activities, quizzes) and list problems per week"
    )]
    async fn validate_course_content(
        &self,
        _params: Parameters<NoParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .course_service
            .validate_content()
            .await
            .map_err(search_error_to_mcp)?;

        json_result(&serde_json::json!({
            "valid": report.is_valid(),
            "issue_count": report.issue_count(),
            "weeks": report.weeks.iter().map(|(week, issues)| {
                serde_json::json!({
                    "week": week,
                    "issues": issues.iter().map(|issue| {
                        serde_json::json!({
                            "day": issue.day,
                            "message": issue.message,
                        })
                    }).collect::<Vec<_>>(),
                })
            }).collect::<Vec<_>>(),
        }))
    }

    /// Reload content and rebuild the search index.
    #[tool(
        description = "Reload the course content from its source and rebuild the search index. Use after the content files change."
    )]
    async fn rebuild_search_index(
        &self,
        _params: Parameters<NoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("MCP Handler: rebuild_search_index called");

        let stats = self
            .course_service
            .rebuild_index()
            .await
            .map_err(|e| {
                tracing::error!("Failed to rebuild search index: {:?}", e);
                search_error_to_mcp(e)
            })?;

        json_result(&serde_json::json!({
            "entry_count": stats.entry_count,
            "resource_entries": stats.resource_entries,
            "activity_entries": stats.activity_entries,
            "bellringer_entries": stats.bellringer_entries,
            "week_count": stats.week_count,
            "built_at": stats.built_at.to_rfc3339(),
        }))
    }
}
