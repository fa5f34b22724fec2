//! Observability module for monitoring and metrics.
//!
//! Counters for index builds and searches, plus a timer that logs
//! operation durations through `tracing`.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
