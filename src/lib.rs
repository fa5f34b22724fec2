//! Course Assistant MCP Server - relevance search over weekly retail-training content.
//!
//! The course (weeks, daily lessons, activities, bellringers and learning
//! resources) is flattened into an in-memory index; free-text questions are
//! scored by literal term frequency and the best resources are ranked per URL.
//! The search is exposed to AI assistants through the Model Context Protocol.
//!
//! # Architecture
//!
//! - **models**: Course content data structures
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Sources of course content (JSON files, in-memory)
//! - **search**: Content index, relevance scoring and result ranking
//! - **validation**: Content quality rules
//! - **services**: Business operations over search and content
//! - **observability**: Metrics and operation timing
//! - **server**: MCP protocol server

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::{ConfigError, ContentError, IndexError, SearchError};
pub use models::{CourseContent, Resource, ResourceRef, ResourceType, WeeklyContent};
pub use observability::{MetricsTracker, Timer};
pub use repositories::{ContentRepository, InMemoryContentRepository, JsonContentRepository};
pub use search::{ContentIndex, ContentSearch, IndexStats, ScoredResult, SearchOptions};
pub use server::CourseAssistantServer;
pub use services::{CourseService, CourseServiceImpl};
pub use validation::{ContentValidator, ValidationReport};
