//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! the content repository and the search engine. They provide a clean
//! boundary between the MCP handlers and the search core.

mod course_service;

pub use course_service::{
    CourseService, CourseServiceImpl, DayOverview, RelatedResources, WeekOverview,
};
