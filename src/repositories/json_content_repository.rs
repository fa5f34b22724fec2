use crate::error::{ContentError, ContentResult};
use crate::models::{CourseContent, WeeklyContent};
use crate::repositories::traits::ContentRepository;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maximum number of week files read concurrently.
const MAX_CONCURRENT_READS: usize = 8;

/// File name looked up inside per-week subdirectories.
const WEEK_DIR_FILE: &str = "content.json";

/// Content repository backed by JSON on disk.
///
/// Two layouts are supported:
/// - a single file holding the week map (`{"1": {...}, "2": {...}}`)
/// - a directory of week files, either `*.json` at the top level or
///   `<week dir>/content.json`, each holding one week
pub struct JsonContentRepository {
    path: PathBuf,
}

impl JsonContentRepository {
    /// Create a new repository reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_directory(&self) -> ContentResult<CourseContent> {
        let files = week_files(&self.path).await?;
        tracing::debug!(
            "Loading {} week files from {}",
            files.len(),
            self.path.display()
        );

        let weeks = stream::iter(files)
            .map(|file| async move { read_json::<WeeklyContent>(&file).await })
            .buffer_unordered(MAX_CONCURRENT_READS)
            .collect::<Vec<_>>()
            .await;

        let mut course = CourseContent::new();
        for week in weeks {
            let week = week?;
            if course.weeks.contains_key(&week.week_number) {
                return Err(ContentError::DuplicateWeek(week.week_number));
            }
            course.insert_week(week);
        }

        Ok(course)
    }
}

#[async_trait]
impl ContentRepository for JsonContentRepository {
    async fn load(&self) -> ContentResult<CourseContent> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        let course = if metadata.is_dir() {
            self.load_directory().await?
        } else {
            read_json::<CourseContent>(&self.path).await?
        };

        tracing::info!(
            "Loaded {} weeks of course content from {}",
            course.weeks.len(),
            self.path.display()
        );
        Ok(course)
    }

    fn describe(&self) -> String {
        format!("JSON course content at {}", self.path.display())
    }
}

/// Collect week files in a stable order.
async fn week_files(dir: &Path) -> ContentResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| io_error(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(dir, e))? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(|e| io_error(&path, e))?;

        if file_type.is_dir() {
            let nested = path.join(WEEK_DIR_FILE);
            if tokio::fs::try_exists(&nested)
                .await
                .map_err(|e| io_error(&nested, e))?
            {
                files.push(nested);
            }
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> ContentResult<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_error(path, e))?;

    serde_json::from_str(&text).map_err(|e| ContentError::Parse {
        origin: path.display().to_string(),
        message: e.to_string(),
    })
}

fn io_error(path: &Path, source: std::io::Error) -> ContentError {
    if source.kind() == ErrorKind::NotFound {
        ContentError::NotFound(path.to_path_buf())
    } else {
        ContentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_path_is_not_found() {
        let repo = JsonContentRepository::new("/definitely/not/here/course.json");
        let result = repo.load().await;
        assert!(matches!(result, Err(ContentError::NotFound(_))));
    }

    #[test]
    fn test_describe_mentions_path() {
        let repo = JsonContentRepository::new("data/course_content.json");
        assert!(repo.describe().contains("data/course_content.json"));
        assert_eq!(repo.path(), Path::new("data/course_content.json"));
    }
}
