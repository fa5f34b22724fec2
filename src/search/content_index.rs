//! Flat content index built from the nested course structure.
//!
//! Every resource, activity and bellringer of every day becomes one
//! [`IndexedEntry`] carrying lowercased searchable text and its week/day
//! location. The index is immutable once built; rebuilding produces a new one.

use crate::error::{IndexError, IndexResult};
use crate::models::{Activity, Bellringer, CourseContent, Resource, ResourceRef};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source category of an indexed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Resource,
    Activity,
    Bellringer,
}

impl EntryKind {
    /// Get display name for the entry kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Activity => "activity",
            Self::Bellringer => "bellringer",
        }
    }
}

/// One unit of searchable text.
///
/// Only resource entries carry a resource reference; the constructors are
/// the only way to create an entry, so kind and reference always agree.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    kind: EntryKind,
    searchable_text: String,
    resource: Option<ResourceRef>,
    week: u32,
    day: String,
}

impl IndexedEntry {
    /// Entry for a resource: title, description and key takeaways.
    pub fn for_resource(resource: ResourceRef, week: u32, day: impl Into<String>) -> Self {
        let mut parts = vec![resource.title.as_str(), resource.description.as_str()];
        parts.extend(resource.key_takeaways().iter().map(String::as_str));

        Self {
            kind: EntryKind::Resource,
            searchable_text: join_lowercase(parts),
            resource: Some(resource),
            week,
            day: day.into(),
        }
    }

    /// Entry for an activity: title, description and every instruction.
    pub fn for_activity(activity: &Activity, week: u32, day: impl Into<String>) -> Self {
        let mut parts = vec![activity.title.as_str(), activity.description.as_str()];
        parts.extend(activity.instructions.iter().map(String::as_str));

        Self {
            kind: EntryKind::Activity,
            searchable_text: join_lowercase(parts),
            resource: None,
            week,
            day: day.into(),
        }
    }

    /// Entry for a bellringer: question and explanation.
    pub fn for_bellringer(bellringer: &Bellringer, week: u32, day: impl Into<String>) -> Self {
        let mut parts = vec![bellringer.question.as_str()];
        if let Some(explanation) = bellringer.explanation.as_deref() {
            parts.push(explanation);
        }

        Self {
            kind: EntryKind::Bellringer,
            searchable_text: join_lowercase(parts),
            resource: None,
            week,
            day: day.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Lowercased text used for scoring; never displayed.
    pub fn searchable_text(&self) -> &str {
        &self.searchable_text
    }

    pub fn resource(&self) -> Option<&ResourceRef> {
        self.resource.as_ref()
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn day(&self) -> &str {
        &self.day
    }
}

fn join_lowercase(parts: Vec<&str>) -> String {
    parts.join(" ").to_lowercase()
}

/// Summary of a built index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub entry_count: usize,
    pub resource_entries: usize,
    pub activity_entries: usize,
    pub bellringer_entries: usize,
    pub week_count: usize,
    pub built_at: DateTime<Utc>,
}

/// Flat, immutable list of indexed entries.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    entries: Vec<IndexedEntry>,
    stats: IndexStats,
}

impl ContentIndex {
    /// Build the index from course content.
    ///
    /// Entries are emitted in a fixed order: weeks ascending, days in
    /// calendar order, and within a day the resources as authored followed
    /// by the activity and the bellringer.
    ///
    /// The whole build fails on the first malformed unit; nothing partial is
    /// ever returned.
    pub fn build(content: &CourseContent) -> IndexResult<Self> {
        let mut entries = Vec::new();

        for (&key, week) in &content.weeks {
            if week.week_number != key {
                return Err(IndexError::WeekMismatch {
                    key,
                    declared: week.week_number,
                });
            }

            for (day, daily) in week.days_in_order() {
                for (position, resource) in daily.resources.iter().enumerate() {
                    check_resource(resource, key, day, position)?;
                    entries.push(IndexedEntry::for_resource(
                        Arc::new(resource.clone()),
                        key,
                        day,
                    ));
                }

                entries.push(IndexedEntry::for_activity(&daily.activity, key, day));
                entries.push(IndexedEntry::for_bellringer(&daily.bellringer, key, day));
            }
        }

        let count = |kind: EntryKind| entries.iter().filter(|e| e.kind == kind).count();
        let stats = IndexStats {
            entry_count: entries.len(),
            resource_entries: count(EntryKind::Resource),
            activity_entries: count(EntryKind::Activity),
            bellringer_entries: count(EntryKind::Bellringer),
            week_count: content.weeks.len(),
            built_at: Utc::now(),
        };

        Ok(Self { entries, stats })
    }

    pub fn entries(&self) -> &[IndexedEntry] {
        &self.entries
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first indexed resource with the given URL.
    pub fn find_resource(&self, url: &str) -> Option<&ResourceRef> {
        self.entries
            .iter()
            .filter_map(IndexedEntry::resource)
            .find(|resource| resource.url == url)
    }
}

/// Reject resources that cannot be ranked: the URL is the dedup key and the
/// title is what callers display.
fn check_resource(resource: &Resource, week: u32, day: &str, position: usize) -> IndexResult<()> {
    let reason = if resource.url.trim().is_empty() {
        "empty url"
    } else if resource.title.trim().is_empty() {
        "empty title"
    } else {
        return Ok(());
    };

    Err(IndexError::MalformedResource {
        week,
        day: day.to_string(),
        position: position + 1,
        reason: reason.to_string(),
    })
}
