//! Error types for the Course Assistant MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading course content.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Reading a content file failed
    #[error("Failed to read {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content JSON did not match the expected structure
    #[error("Invalid course content in {origin}: {message}")]
    Parse { origin: String, message: String },

    /// Content path does not exist
    #[error("Course content not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Two sources defined the same week
    #[error("Week {0} is defined more than once")]
    DuplicateWeek(u32),
}

/// Errors that can occur while building the search index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A resource cannot be indexed
    #[error("Malformed resource {position} in week {week}, {day}: {reason}")]
    MalformedResource {
        week: u32,
        day: String,
        position: usize,
        reason: String,
    },

    /// A week's `weekNumber` disagrees with the key it is stored under
    #[error("Week stored under key {key} declares weekNumber {declared}")]
    WeekMismatch { key: u32, declared: u32 },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur during search operations.
///
/// An empty `Ok` means nothing matched; an `Err` means the search could not run.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Content could not be loaded for lazy index construction
    #[error("Course content unavailable: {0}")]
    ContentUnavailable(#[from] ContentError),

    /// Building the index failed
    #[error("Search index build failed: {0}")]
    IndexBuild(#[from] IndexError),

    /// The caller cancelled the scan
    #[error("Search cancelled")]
    Cancelled,

    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// Requested week or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for Results with ContentError
pub type ContentResult<T> = Result<T, ContentError>;

/// Convenience type alias for Results with IndexError
pub type IndexResult<T> = Result<T, IndexError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;
