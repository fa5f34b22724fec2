//! Course structure: weeks, days, and the lesson parts attached to each day.

use super::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weekday names in calendar order, used to order a week's days.
const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Interaction style of a bellringer question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BellringerKind {
    Poll,
    DragDrop,
    Quiz,
    Text,
    Image,
}

/// Expected answer for a bellringer: a single option or a set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// Whether the answer carries no usable value.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(answer) => answer.trim().is_empty(),
            Self::Multiple(answers) => answers.iter().all(|a| a.trim().is_empty()),
        }
    }
}

/// Short warm-up question opening a daily lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bellringer {
    pub question: String,

    #[serde(rename = "type")]
    pub kind: BellringerKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<CorrectAnswer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// In-class activity for a daily lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub title: String,
    pub description: String,
    pub instructions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<String>>,
}

/// Everything taught on one day of a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyContent {
    pub bellringer: Bellringer,
    pub activity: Activity,
    pub resources: Vec<Resource>,
}

/// A single end-of-week quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// End-of-week quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

/// One week of the course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyContent {
    pub week_number: u32,
    pub title: String,
    pub description: String,
    pub days: BTreeMap<String, DailyContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Quiz>,
}

impl WeeklyContent {
    /// Days in calendar order (Monday first), unknown day names last in
    /// lexical order.
    pub fn days_in_order(&self) -> Vec<(&str, &DailyContent)> {
        let mut days: Vec<(&str, &DailyContent)> = self
            .days
            .iter()
            .map(|(name, content)| (name.as_str(), content))
            .collect();
        days.sort_by_key(|(name, _)| (weekday_rank(name), *name));
        days
    }
}

/// Position of a day name in the week; names that are not weekdays sort last.
pub fn weekday_rank(day: &str) -> usize {
    let lower = day.trim().to_lowercase();
    WEEKDAYS
        .iter()
        .position(|d| *d == lower)
        .unwrap_or(WEEKDAYS.len())
}

/// The whole course, keyed by week number.
///
/// Serialized as a JSON object whose keys are week numbers
/// (`{"1": {...}, "2": {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseContent {
    pub weeks: BTreeMap<u32, WeeklyContent>,
}

impl CourseContent {
    /// Create an empty course.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a week, keyed by its own week number.
    pub fn insert_week(&mut self, week: WeeklyContent) -> Option<WeeklyContent> {
        self.weeks.insert(week.week_number, week)
    }

    /// Get a week by number.
    pub fn week(&self, number: u32) -> Option<&WeeklyContent> {
        self.weeks.get(&number)
    }

    /// Iterate over every resource with its week and day.
    pub fn resources(&self) -> impl Iterator<Item = (u32, &str, &Resource)> {
        self.weeks.iter().flat_map(|(number, week)| {
            week.days_in_order().into_iter().flat_map(move |(day, content)| {
                content
                    .resources
                    .iter()
                    .map(move |resource| (*number, day, resource))
            })
        })
    }

    /// Find the first resource with the given URL.
    pub fn find_resource(&self, url: &str) -> Option<&Resource> {
        self.resources()
            .find(|(_, _, resource)| resource.url == url)
            .map(|(_, _, resource)| resource)
    }
}
