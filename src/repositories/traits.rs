use crate::error::ContentResult;
use crate::models::CourseContent;
use async_trait::async_trait;

/// Source of the course content.
///
/// Provides abstraction over where the course lives, enabling different
/// implementations (JSON files, in-memory fixtures, mocks).
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load the complete course.
    async fn load(&self) -> ContentResult<CourseContent>;

    /// Human-readable description of the source, used in logs.
    fn describe(&self) -> String;
}
