//! Data models for the course content.
//!
//! This module contains the data structures representing weeks, daily lessons,
//! bellringers, activities, quizzes and the learning resources attached to them.

pub mod course;
pub mod resource;

pub use course::{
    weekday_rank, Activity, Bellringer, BellringerKind, CorrectAnswer, CourseContent,
    DailyContent, Quiz, QuizQuestion, WeeklyContent,
};
pub use resource::{Resource, ResourceRef, ResourceType};
