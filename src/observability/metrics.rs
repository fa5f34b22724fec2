//! Search and indexing metrics.
//!
//! Counters are atomics behind `Arc`, so a tracker can be cloned into any
//! component that needs to report.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Counters for index builds and searches.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    index_builds_total: Arc<AtomicU64>,
    index_build_failures_total: Arc<AtomicU64>,
    search_queries_total: Arc<AtomicU64>,
    search_failures_total: Arc<AtomicU64>,
    searches_cancelled_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            index_builds_total: Arc::new(AtomicU64::new(0)),
            index_build_failures_total: Arc::new(AtomicU64::new(0)),
            search_queries_total: Arc::new(AtomicU64::new(0)),
            search_failures_total: Arc::new(AtomicU64::new(0)),
            searches_cancelled_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track an index build attempt.
    pub fn track_index_build(&self, success: bool) {
        if success {
            self.index_builds_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.index_build_failures_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Track a completed search query.
    pub fn track_search_query(&self, duration_ms: u128, result_count: usize) {
        self.search_queries_total.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search query completed"
        );
    }

    /// Track a search that failed to run.
    pub fn track_search_failure(&self) {
        self.search_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Track a search aborted by its caller.
    pub fn track_search_cancelled(&self) {
        self.searches_cancelled_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of successful index builds.
    pub fn index_builds_total(&self) -> u64 {
        self.index_builds_total.load(Ordering::Relaxed)
    }

    /// Get the number of failed index builds.
    pub fn index_build_failures_total(&self) -> u64 {
        self.index_build_failures_total.load(Ordering::Relaxed)
    }

    /// Get the number of completed searches.
    pub fn search_queries_total(&self) -> u64 {
        self.search_queries_total.load(Ordering::Relaxed)
    }

    /// Get the number of failed searches.
    pub fn search_failures_total(&self) -> u64 {
        self.search_failures_total.load(Ordering::Relaxed)
    }

    /// Get the number of cancelled searches.
    pub fn searches_cancelled_total(&self) -> u64 {
        self.searches_cancelled_total.load(Ordering::Relaxed)
    }

    /// Get the search failure rate (0.0 to 1.0) over all finished searches.
    pub fn search_failure_rate(&self) -> f64 {
        let failures = self.search_failures_total() as f64;
        let total = (self.search_queries_total() + self.search_failures_total()) as f64;

        if total == 0.0 {
            0.0
        } else {
            failures / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Index Builds: {}\n\
             Index Build Failures: {}\n\
             Search Queries: {}\n\
             Search Failures: {} ({:.2}% failure rate)\n\
             Searches Cancelled: {}",
            self.index_builds_total(),
            self.index_build_failures_total(),
            self.search_queries_total(),
            self.search_failures_total(),
            self.search_failure_rate() * 100.0,
            self.searches_cancelled_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }

    /// Finish the timer with a specific status.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}
