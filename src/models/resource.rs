//! Resource model representing an external learning link attached to a lesson.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared reference to a Resource.
///
/// Index entries and search results point at the same resource record
/// instead of cloning it per entry.
pub type ResourceRef = Arc<Resource>;

/// Kind of learning resource.
///
/// Unknown kinds are preserved as [`ResourceType::Other`] so that content
/// validation can report them instead of failing to load the course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Video,
    Article,
    Document,
    Link,
    Other(String),
}

impl ResourceType {
    /// Get the wire name for the resource type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Article => "article",
            Self::Document => "document",
            Self::Link => "link",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the recognised resource kinds.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ResourceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "video" => Self::Video,
            "article" => Self::Article,
            "document" => Self::Document,
            "link" => Self::Link,
            _ => Self::Other(raw),
        }
    }
}

impl From<ResourceType> for String {
    fn from(kind: ResourceType) -> Self {
        match kind {
            ResourceType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external learning link (article, video, document) used in a daily lesson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Display title
    pub title: String,

    /// Resource kind
    #[serde(rename = "type")]
    pub resource_type: ResourceType,

    /// Link target; also the deduplication key for search results
    pub url: String,

    /// Short description
    pub description: String,

    /// Running time for videos, e.g. "15:45"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_takeaways: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion_questions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practical_applications: Option<Vec<String>>,
}

impl Resource {
    /// Create a resource with only the required fields set.
    pub fn new(
        title: impl Into<String>,
        resource_type: ResourceType,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            resource_type,
            url: url.into(),
            description: description.into(),
            duration: None,
            key_takeaways: None,
            discussion_questions: None,
            practical_applications: None,
        }
    }

    /// Attach key takeaways.
    pub fn with_key_takeaways<I, S>(mut self, takeaways: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_takeaways = Some(takeaways.into_iter().map(Into::into).collect());
        self
    }

    /// Key takeaways as a slice (empty when absent).
    pub fn key_takeaways(&self) -> &[String] {
        self.key_takeaways.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_deserialization() {
        let json = r#"{
            "title": "Understanding Retail Channels",
            "type": "video",
            "url": "https://www.nrf.com/topics/customer-experience",
            "description": "Overview of different retail channels",
            "duration": "15:45",
            "keyTakeaways": ["Different types of retail channels", "Future trends in retail"]
        }"#;

        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.title, "Understanding Retail Channels");
        assert_eq!(resource.resource_type, ResourceType::Video);
        assert_eq!(resource.duration.as_deref(), Some("15:45"));
        assert_eq!(resource.key_takeaways().len(), 2);
        assert!(resource.discussion_questions.is_none());
    }

    #[test]
    fn test_unknown_resource_type_is_preserved() {
        let json = r#"{"title": "T", "type": "podcast", "url": "https://x.test", "description": "D"}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();

        assert_eq!(
            resource.resource_type,
            ResourceType::Other("podcast".to_string())
        );
        assert!(!resource.resource_type.is_known());

        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(back["type"], "podcast");
    }

    #[test]
    fn test_serialization_skips_absent_lists() {
        let resource = Resource::new("T", ResourceType::Article, "https://x.test", "D");
        let value = serde_json::to_value(&resource).unwrap();

        assert_eq!(value["type"], "article");
        assert!(value.get("keyTakeaways").is_none());
        assert!(value.get("duration").is_none());
    }

    #[test]
    fn test_with_key_takeaways() {
        let resource = Resource::new("T", ResourceType::Link, "https://x.test", "D")
            .with_key_takeaways(["one", "two"]);
        assert_eq!(resource.key_takeaways(), ["one", "two"]);
    }
}
