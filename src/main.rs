//! Course Assistant MCP Server - Main entry point
//!
//! This is the main executable for the course assistant, which provides a Model
//! Context Protocol (MCP) interface for searching weekly retail-training content.

use anyhow::Result;
use course_assistant_mcp::repositories::{ContentRepository, JsonContentRepository};
use course_assistant_mcp::search::ContentSearch;
use course_assistant_mcp::services::{CourseService, CourseServiceImpl};
use course_assistant_mcp::{Config, CourseAssistantServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let repository = Arc::new(JsonContentRepository::new(config.content_path.clone()))
        as Arc<dyn ContentRepository>;
    info!("Course content source: {}", repository.describe());

    let options = config.search_options();
    info!(
        "Search options: batch_size={}, max_results={}, include_day_context={}",
        options.batch_size, options.max_results, options.include_day_context
    );
    let search = Arc::new(ContentSearch::new(repository.clone(), options));

    if config.eager_index {
        // A failed eager build is retried lazily on the first search
        match search.rebuild_from_source().await {
            Ok(stats) => info!(
                "Search index ready: {} entries across {} weeks",
                stats.entry_count, stats.week_count
            ),
            Err(e) => error!("Eager index build failed: {}", e),
        }
    }

    let course_service =
        Arc::new(CourseServiceImpl::new(repository, search.clone())) as Arc<dyn CourseService>;
    let server = CourseAssistantServer::new(course_service);

    info!("Starting MCP server with stdio transport");
    course_assistant_mcp::server::run_server(server).await?;

    info!("{}", search.metrics().summary());
    info!("Course Assistant MCP Server shutdown complete");
    Ok(())
}
