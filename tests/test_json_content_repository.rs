//! Integration tests for loading course content from JSON on disk.

use course_assistant_mcp::error::ContentError;
use course_assistant_mcp::repositories::{ContentRepository, JsonContentRepository};
use course_assistant_mcp::search::{ContentSearch, SearchOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;
use tokio_test::{assert_err, assert_ok};

fn week_json(number: u32, resource_title: &str) -> String {
    format!(
        r#"{{
            "weekNumber": {number},
            "title": "Week {number}",
            "description": "Week {number} lessons",
            "days": {{
                "Monday": {{
                    "bellringer": {{
                        "question": "What did you notice?",
                        "type": "text"
                    }},
                    "activity": {{
                        "title": "Floor Walk",
                        "description": "Observe the store",
                        "instructions": ["Walk", "Take notes"]
                    }},
                    "resources": [
                        {{
                            "title": "{resource_title}",
                            "type": "article",
                            "url": "https://example.com/week{number}",
                            "description": "Reading for week {number}",
                            "keyTakeaways": ["One", "Two", "Three"]
                        }}
                    ]
                }}
            }}
        }}"#
    )
}

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_load_single_file_week_map() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("course.json");
    write(
        &file,
        &format!(
            r#"{{"1": {}, "2": {}}}"#,
            week_json(1, "Retail Basics"),
            week_json(2, "Loss Prevention Basics")
        ),
    );

    let repo = JsonContentRepository::new(&file);
    let course = assert_ok!(repo.load().await);

    assert_eq!(course.weeks.len(), 2);
    assert_eq!(course.week(2).unwrap().title, "Week 2");
    assert_eq!(
        course
            .find_resource("https://example.com/week1")
            .map(|r| r.title.as_str()),
        Some("Retail Basics")
    );
}

#[tokio::test]
async fn test_load_directory_of_week_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("week1.json"), &week_json(1, "Retail Basics"));
    write(&dir.path().join("week2.json"), &week_json(2, "Service Basics"));
    write(&dir.path().join("notes.txt"), "not course content");

    let nested = dir.path().join("week3");
    std::fs::create_dir(&nested).unwrap();
    write(&nested.join("content.json"), &week_json(3, "Safety Basics"));

    let course = assert_ok!(JsonContentRepository::new(dir.path()).load().await);
    assert_eq!(course.weeks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_duplicate_week_in_directory() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.json"), &week_json(1, "First"));
    write(&dir.path().join("b.json"), &week_json(1, "Second"));

    let err = assert_err!(JsonContentRepository::new(dir.path()).load().await);
    assert!(matches!(err, ContentError::DuplicateWeek(1)));
}

#[tokio::test]
async fn test_parse_error_names_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("week1.json");
    // Resource without a url
    write(
        &file,
        &week_json(1, "Broken").replace(r#""url": "https://example.com/week1","#, ""),
    );

    match JsonContentRepository::new(dir.path()).load().await {
        Err(ContentError::Parse { origin, message }) => {
            assert!(origin.ends_with("week1.json"));
            assert!(message.contains("url"));
        }
        other => panic!("Expected Parse error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_directory_is_empty_course() {
    let dir = tempdir().unwrap();
    let course = JsonContentRepository::new(dir.path()).load().await.unwrap();
    assert!(course.weeks.is_empty());
}

#[tokio::test]
async fn test_bundled_course_is_searchable() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/weeks");
    let repo = Arc::new(JsonContentRepository::new(path)) as Arc<dyn ContentRepository>;

    let course = repo.load().await.unwrap();
    assert_eq!(course.weeks.len(), 6);
    assert_eq!(
        course.week(5).unwrap().title,
        "Loss Prevention and Workplace Safety"
    );

    let search = ContentSearch::new(repo, SearchOptions::default());
    let results = search.search_in_week("loss prevention", 5).await.unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 3);
}
