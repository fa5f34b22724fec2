//! Content validation rules for resources, days, weeks and quizzes.

use crate::models::{CourseContent, Resource, WeeklyContent};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// A single validation problem within a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Day the problem belongs to, `None` for week-level problems
    pub day: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    fn week_level(message: impl Into<String>) -> Self {
        Self {
            day: None,
            message: message.into(),
        }
    }

    fn for_day(day: &str, message: impl Into<String>) -> Self {
        Self {
            day: Some(day.to_string()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.day {
            Some(day) => write!(f, "{}: {}", day, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Validation problems for every week of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems per week number; weeks without problems map to an empty list
    pub weeks: BTreeMap<u32, Vec<ValidationIssue>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.weeks.values().all(Vec::is_empty)
    }

    pub fn issue_count(&self) -> usize {
        self.weeks.values().map(Vec::len).sum()
    }
}

/// Validator for course content quality rules.
#[derive(Debug, Clone)]
pub struct ContentValidator {
    /// Minimum resource description length in characters
    pub min_description_length: usize,

    /// Minimum number of key takeaways per resource
    pub min_takeaways: usize,

    /// Maximum resource URL length
    pub max_url_length: usize,
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self {
            min_description_length: 50,
            min_takeaways: 3,
            max_url_length: 200,
        }
    }
}

impl ContentValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a single resource, returning every problem found.
    pub fn validate_resource(&self, resource: &Resource) -> Vec<String> {
        let mut errors = Vec::new();

        let required = [
            ("title", resource.title.trim().is_empty()),
            ("url", resource.url.trim().is_empty()),
            ("description", resource.description.trim().is_empty()),
            ("keyTakeaways", resource.key_takeaways.is_none()),
        ];
        for (field, missing) in required {
            if missing {
                errors.push(format!("Missing required field: {}", field));
            }
        }

        if !resource.resource_type.is_known() {
            errors.push(format!("Invalid resource type: {}", resource.resource_type));
        }

        if Url::parse(&resource.url).is_ok() {
            if resource.url.len() > self.max_url_length {
                errors.push("URL exceeds maximum length".to_string());
            }
        } else {
            errors.push("Invalid URL format".to_string());
        }

        if resource.description.chars().count() < self.min_description_length {
            errors.push("Description is too short".to_string());
        }

        if resource.key_takeaways().len() < self.min_takeaways {
            errors.push(format!(
                "Must have at least {} key takeaways",
                self.min_takeaways
            ));
        }

        errors
    }

    /// Validate one week: structure, every day, and the quiz if present.
    pub fn validate_weekly_content(&self, week: &WeeklyContent) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if week.week_number == 0
            || week.title.trim().is_empty()
            || week.description.trim().is_empty()
            || week.days.is_empty()
        {
            issues.push(ValidationIssue::week_level(
                "Missing required weekly content fields",
            ));
        }

        for (day, content) in week.days_in_order() {
            let bellringer = &content.bellringer;
            let has_answer = bellringer
                .correct_answer
                .as_ref()
                .is_some_and(|answer| !answer.is_empty());
            if bellringer.question.trim().is_empty() || !has_answer {
                issues.push(ValidationIssue::for_day(day, "Invalid bellringer"));
            }

            let activity = &content.activity;
            if activity.title.trim().is_empty() || activity.instructions.is_empty() {
                issues.push(ValidationIssue::for_day(day, "Invalid activity"));
            }

            for (position, resource) in content.resources.iter().enumerate() {
                let errors = self.validate_resource(resource);
                if !errors.is_empty() {
                    issues.push(ValidationIssue::for_day(
                        day,
                        format!("Invalid resource {}: {}", position + 1, errors.join(", ")),
                    ));
                }
            }
        }

        if let Some(quiz) = &week.quiz {
            if quiz.questions.is_empty() {
                issues.push(ValidationIssue::week_level("Quiz must contain questions"));
            }

            for (position, question) in quiz.questions.iter().enumerate() {
                if question.question.trim().is_empty()
                    || question.options.is_empty()
                    || question.correct_answer.trim().is_empty()
                {
                    issues.push(ValidationIssue::week_level(format!(
                        "Invalid quiz question {}",
                        position + 1
                    )));
                }
            }
        }

        issues
    }

    /// Validate every week of the course.
    pub fn validate_all(&self, course: &CourseContent) -> ValidationReport {
        let weeks = course
            .weeks
            .iter()
            .map(|(&number, week)| {
                let issues = self.validate_weekly_content(week);
                for issue in &issues {
                    tracing::warn!(week = number, "Content validation: {}", issue);
                }
                (number, issues)
            })
            .collect();

        ValidationReport { weeks }
    }
}
