use crate::error::ContentResult;
use crate::models::CourseContent;
use crate::repositories::traits::ContentRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Content repository holding the course in memory.
///
/// The content can be replaced at runtime; the next index build picks up
/// the new version.
pub struct InMemoryContentRepository {
    content: RwLock<CourseContent>,
}

impl InMemoryContentRepository {
    /// Create a new repository serving `content`.
    pub fn new(content: CourseContent) -> Self {
        Self {
            content: RwLock::new(content),
        }
    }

    /// Replace the served content.
    pub async fn replace(&self, content: CourseContent) {
        *self.content.write().await = content;
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn load(&self) -> ContentResult<CourseContent> {
        Ok(self.content.read().await.clone())
    }

    fn describe(&self) -> String {
        "in-memory course content".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeeklyContent;
    use std::collections::BTreeMap;

    fn week(number: u32) -> WeeklyContent {
        WeeklyContent {
            week_number: number,
            title: format!("Week {}", number),
            description: String::new(),
            days: BTreeMap::new(),
            quiz: None,
        }
    }

    #[tokio::test]
    async fn test_load_and_replace() {
        let mut course = CourseContent::new();
        course.insert_week(week(1));
        let repo = InMemoryContentRepository::new(course);

        assert_eq!(repo.load().await.unwrap().weeks.len(), 1);

        let mut replacement = CourseContent::new();
        replacement.insert_week(week(1));
        replacement.insert_week(week(2));
        repo.replace(replacement).await;

        assert_eq!(repo.load().await.unwrap().weeks.len(), 2);
    }
}
