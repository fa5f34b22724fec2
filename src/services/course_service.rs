//! Course service layer.
//!
//! Business logic for searching course resources, browsing weeks and
//! checking content quality.

use crate::error::{SearchError, SearchResult};
use crate::models::ResourceRef;
use crate::repositories::ContentRepository;
use crate::search::{ContentSearch, IndexStats, ScoredResult, SearchRequest};
use crate::validation::{ContentValidator, ValidationReport};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Maximum accepted query length in characters.
const MAX_QUERY_LENGTH: usize = 500;

/// A resource together with the resources most related to it.
#[derive(Debug, Clone)]
pub struct RelatedResources {
    pub source: ResourceRef,
    pub related: Vec<ScoredResult>,
}

/// Summary of one day of a week.
#[derive(Debug, Clone, Serialize)]
pub struct DayOverview {
    pub day: String,
    pub activity_title: String,
    pub bellringer_question: String,
    pub resource_titles: Vec<String>,
}

/// Summary of one week of the course.
#[derive(Debug, Clone, Serialize)]
pub struct WeekOverview {
    pub week_number: u32,
    pub title: String,
    pub description: String,
    pub days: Vec<DayOverview>,
    pub quiz_questions: usize,
}

/// Course service trait for business operations.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Rank course resources for a free-text query, optionally within one week.
    async fn search_resources(
        &self,
        query: String,
        week: Option<u32>,
    ) -> SearchResult<Vec<ScoredResult>>;

    /// Find resources related to the resource at `url` by searching its title.
    async fn related_resources(&self, url: String) -> SearchResult<RelatedResources>;

    /// Summarize one week.
    async fn week_overview(&self, week: u32) -> SearchResult<WeekOverview>;

    /// Validate the content currently served by the repository.
    async fn validate_content(&self) -> SearchResult<ValidationReport>;

    /// Reload content and rebuild the search index.
    async fn rebuild_index(&self) -> SearchResult<IndexStats>;

    /// Stats of the current index, if built.
    async fn index_stats(&self) -> Option<IndexStats>;
}

/// Default implementation of CourseService.
pub struct CourseServiceImpl {
    repository: Arc<dyn ContentRepository>,
    search: Arc<ContentSearch>,
    validator: ContentValidator,
}

/// Validation helper functions.
impl CourseServiceImpl {
    /// Validate search query.
    fn validate_search_query(query: &str) -> Result<(), String> {
        if query.chars().count() > MAX_QUERY_LENGTH {
            return Err(format!(
                "Search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            ));
        }
        Ok(())
    }

    /// Validate resource URL parameter.
    fn validate_url(url: &str) -> Result<(), String> {
        if url.trim().is_empty() {
            return Err("Resource URL cannot be empty".to_string());
        }
        Ok(())
    }
}

impl CourseServiceImpl {
    /// Create a new course service.
    pub fn new(repository: Arc<dyn ContentRepository>, search: Arc<ContentSearch>) -> Self {
        Self {
            repository,
            search,
            validator: ContentValidator::default(),
        }
    }

    /// Use a custom validator.
    pub fn with_validator(mut self, validator: ContentValidator) -> Self {
        self.validator = validator;
        self
    }

    async fn ensure_week_exists(&self, week: u32) -> SearchResult<()> {
        let content = self.search.content().await?;
        if content.week(week).is_none() {
            return Err(SearchError::NotFound(format!("Week {}", week)));
        }
        Ok(())
    }
}

#[async_trait]
impl CourseService for CourseServiceImpl {
    async fn search_resources(
        &self,
        query: String,
        week: Option<u32>,
    ) -> SearchResult<Vec<ScoredResult>> {
        Self::validate_search_query(&query).map_err(SearchError::InvalidParameters)?;

        let mut request = SearchRequest::new(&query);
        if let Some(week) = week {
            self.ensure_week_exists(week).await?;
            request = request.in_week(week);
        }

        self.search.search_with(request).await
    }

    async fn related_resources(&self, url: String) -> SearchResult<RelatedResources> {
        Self::validate_url(&url).map_err(SearchError::InvalidParameters)?;

        let source = self
            .search
            .find_resource(&url)
            .await?
            .ok_or_else(|| SearchError::NotFound(format!("Resource {}", url)))?;

        let related = self
            .search
            .search_with(SearchRequest::new(&source.title).excluding(&url))
            .await?;

        Ok(RelatedResources { source, related })
    }

    async fn week_overview(&self, week: u32) -> SearchResult<WeekOverview> {
        let content = self.search.content().await?;
        let weekly = content
            .week(week)
            .ok_or_else(|| SearchError::NotFound(format!("Week {}", week)))?;

        let days = weekly
            .days_in_order()
            .into_iter()
            .map(|(day, daily)| DayOverview {
                day: day.to_string(),
                activity_title: daily.activity.title.clone(),
                bellringer_question: daily.bellringer.question.clone(),
                resource_titles: daily.resources.iter().map(|r| r.title.clone()).collect(),
            })
            .collect();

        Ok(WeekOverview {
            week_number: weekly.week_number,
            title: weekly.title.clone(),
            description: weekly.description.clone(),
            days,
            quiz_questions: weekly.quiz.as_ref().map_or(0, |q| q.questions.len()),
        })
    }

    async fn validate_content(&self) -> SearchResult<ValidationReport> {
        let content = self.repository.load().await?;
        let report = self.validator.validate_all(&content);

        tracing::info!(
            weeks = report.weeks.len(),
            issues = report.issue_count(),
            "Validated {}",
            self.repository.describe()
        );
        Ok(report)
    }

    async fn rebuild_index(&self) -> SearchResult<IndexStats> {
        tracing::info!("Rebuilding search index from {}", self.repository.describe());
        self.search.rebuild_from_source().await
    }

    async fn index_stats(&self) -> Option<IndexStats> {
        self.search.index_stats().await
    }
}
