//! Course fixtures for integration tests.
//!
//! `sample_course` is a small two-week retail course; the builder helpers
//! create ad-hoc content for targeted ranking scenarios.

use course_assistant_mcp::models::{
    Activity, Bellringer, BellringerKind, CorrectAnswer, CourseContent, DailyContent, Quiz,
    QuizQuestion, Resource, ResourceType, WeeklyContent,
};
use std::collections::BTreeMap;

#[allow(dead_code)]
/// Create a resource with the given title, URL and description.
pub fn resource(title: &str, url: &str, description: &str) -> Resource {
    Resource::new(title, ResourceType::Article, url, description)
}

#[allow(dead_code)]
/// Create a day with a neutral bellringer and the given activity title.
pub fn day(resources: Vec<Resource>, activity_title: &str) -> DailyContent {
    DailyContent {
        bellringer: Bellringer {
            question: "Share one thing you noticed on the sales floor".to_string(),
            kind: BellringerKind::Text,
            options: None,
            correct_answer: None,
            explanation: None,
        },
        activity: Activity {
            title: activity_title.to_string(),
            description: "Small group exercise".to_string(),
            instructions: vec!["Discuss with your group".to_string()],
            materials: None,
        },
        resources,
    }
}

#[allow(dead_code)]
/// Create a week from (day name, content) pairs.
pub fn week(number: u32, title: &str, days: Vec<(&str, DailyContent)>) -> WeeklyContent {
    WeeklyContent {
        week_number: number,
        title: title.to_string(),
        description: format!("{} overview", title),
        days: days
            .into_iter()
            .map(|(name, content)| (name.to_string(), content))
            .collect::<BTreeMap<_, _>>(),
        quiz: None,
    }
}

#[allow(dead_code)]
/// Create a course from weeks.
pub fn course(weeks: Vec<WeeklyContent>) -> CourseContent {
    let mut course = CourseContent::new();
    for week in weeks {
        course.insert_week(week);
    }
    course
}

/// Two weeks of retail training content.
///
/// Week 1 covers fundamentals and merchandising, week 2 loss prevention.
/// The visual merchandising guide is taught on two days.
#[allow(dead_code)]
pub fn sample_course() -> CourseContent {
    let merchandising = resource(
        "Visual Merchandising Guide",
        "https://www.shopify.com/retail/visual-merchandising",
        "Learn how product placement and displays influence customer purchasing decisions",
    )
    .with_key_takeaways([
        "Eye level is buy level",
        "Group products by color and theme",
        "Refresh displays regularly",
    ]);

    let mut week1 = week(
        1,
        "Retail Fundamentals",
        vec![
            (
                "Monday",
                day(
                    vec![resource(
                        "Introduction to Retail Operations",
                        "https://www.nrf.com/resources/retail-operations",
                        "An overview of how stores run day to day, from opening to closing",
                    )],
                    "Store Tour",
                ),
            ),
            (
                "Wednesday",
                day(
                    vec![
                        merchandising.clone(),
                        resource(
                            "Customer Experience Basics",
                            "https://www.nrf.com/topics/customer-experience",
                            "Why the customer experience decides whether shoppers return",
                        ),
                    ],
                    "Build a Window Display",
                ),
            ),
            ("Friday", day(vec![merchandising], "Display Critique")),
        ],
    );
    week1.quiz = Some(Quiz {
        questions: vec![QuizQuestion {
            question: "Where should best-selling products be placed?".to_string(),
            options: vec![
                "Eye level".to_string(),
                "Bottom shelf".to_string(),
                "Back room".to_string(),
            ],
            correct_answer: "Eye level".to_string(),
            explanation: None,
        }],
    });

    let mut loss_prevention_day = day(
        vec![
            resource(
                "Retail Loss Prevention",
                "https://www.nrf.com/topics/loss-prevention",
                "Understanding loss prevention techniques in retail",
            )
            .with_key_takeaways(["Shrink includes theft and administrative error"]),
            resource(
                "Workplace Safety Checklist",
                "https://www.osha.gov/retail",
                "Daily checks that keep employees and customers safe",
            ),
        ],
        "Spot the Risk",
    );
    loss_prevention_day.bellringer = Bellringer {
        question: "What are the main types of retail theft?".to_string(),
        kind: BellringerKind::Quiz,
        options: Some(vec![
            "External theft only".to_string(),
            "Internal and external theft".to_string(),
        ]),
        correct_answer: Some(CorrectAnswer::Single(
            "Internal and external theft".to_string(),
        )),
        explanation: Some("Employees can help prevent both kinds of loss".to_string()),
    };

    let week2 = week(
        2,
        "Loss Prevention and Workplace Safety",
        vec![("Monday", loss_prevention_day)],
    );

    course(vec![week1, week2])
}
