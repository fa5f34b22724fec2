use async_trait::async_trait;
use course_assistant_mcp::error::{ContentError, ContentResult};
use course_assistant_mcp::models::CourseContent;
use course_assistant_mcp::repositories::ContentRepository;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock content repository for testing.
///
/// Serves a configurable course, can be switched into a failing mode, and
/// optionally delays every load so concurrent callers overlap. Method calls
/// are counted for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContentRepository {
    content: Arc<Mutex<CourseContent>>,
    failing: Arc<Mutex<bool>>,
    load_delay: Option<Duration>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContentRepository {
    /// Create a new MockContentRepository serving `content`.
    pub fn new(content: CourseContent) -> Self {
        Self {
            content: Arc::new(Mutex::new(content)),
            failing: Arc::new(Mutex::new(false)),
            load_delay: None,
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Sleep for `delay` inside every load.
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = Some(delay);
        self
    }

    /// Replace the served content.
    pub fn set_content(&self, content: CourseContent) {
        *self.content.lock().unwrap() = content;
    }

    /// Make subsequent loads fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContentRepository {
    fn default() -> Self {
        Self::new(CourseContent::new())
    }
}

#[async_trait]
impl ContentRepository for MockContentRepository {
    async fn load(&self) -> ContentResult<CourseContent> {
        self.track_call("load");

        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }

        if *self.failing.lock().unwrap() {
            return Err(ContentError::NotFound(PathBuf::from("mock://course")));
        }

        Ok(self.content.lock().unwrap().clone())
    }

    fn describe(&self) -> String {
        "mock course content".to_string()
    }
}
