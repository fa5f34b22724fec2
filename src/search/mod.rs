//! Relevance search over the course content.
//!
//! The content is flattened into an index of searchable entries, scored by
//! literal term frequency, and ranked per resource URL.

pub mod content_index;
pub mod content_search;
pub mod scoring;

pub use content_index::{ContentIndex, EntryKind, IndexStats, IndexedEntry};
pub use content_search::{ContentSearch, ScoredResult, SearchOptions, SearchRequest};
pub use scoring::{query_terms, relevance_score, score_query};
