//! Quality checks for authored course content.
//!
//! Validation reports problems without rejecting the content; indexing only
//! requires what ranking needs, while these rules describe what a complete
//! lesson should contain.

pub mod content_validator;

pub use content_validator::{ContentValidator, ValidationIssue, ValidationReport};
