//! Search engine over the course content index.
//!
//! [`ContentSearch`] owns the current index snapshot and ranks resources for
//! a query: every entry is scored, resource scores are summed per URL, the
//! candidates are sorted by score (ties keep indexing order) and truncated.
//! The scan yields to the runtime after every batch of entries.

use crate::error::{IndexResult, SearchError, SearchResult};
use crate::models::{CourseContent, ResourceRef};
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::{ContentRepository, InMemoryContentRepository};
use crate::search::content_index::{ContentIndex, IndexStats};
use crate::search::scoring::{query_terms, relevance_score};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Tuning options for [`ContentSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Entries scanned between cooperative yields
    pub batch_size: usize,

    /// Maximum number of resources returned per search
    pub max_results: usize,

    /// Let activity and bellringer matches boost resources taught on the same day
    pub include_day_context: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_results: 3,
            include_day_context: false,
        }
    }
}

/// A ranked resource with its accumulated score.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    /// Deduplication key (the resource URL)
    pub key: String,

    /// Summed relevance score
    pub score: u64,

    pub resource: ResourceRef,
}

/// A single search invocation.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub query: &'a str,

    /// Only scan entries of this week
    pub week: Option<u32>,

    /// Never return the resource with this URL
    pub exclude_url: Option<&'a str>,

    /// Checked after every batch; a set flag aborts the scan
    pub cancel: Option<&'a AtomicBool>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            week: None,
            exclude_url: None,
            cancel: None,
        }
    }

    pub fn in_week(mut self, week: u32) -> Self {
        self.week = Some(week);
        self
    }

    pub fn excluding(mut self, url: &'a str) -> Self {
        self.exclude_url = Some(url);
        self
    }

    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Content the index was built from, swapped as one unit.
struct Snapshot {
    content: Arc<CourseContent>,
    index: ContentIndex,
}

/// Candidate resource accumulated during a scan.
struct Candidate {
    resource: ResourceRef,
    score: u64,
    /// Distinct (week, day) pairs where the resource itself matched
    locations: Vec<(u32, String)>,
}

/// URL-keyed score accumulator preserving first-insertion order.
#[derive(Default)]
struct Ranking {
    candidates: Vec<Candidate>,
    positions: HashMap<String, usize>,
}

impl Ranking {
    fn add(&mut self, resource: &ResourceRef, score: u64, week: u32, day: &str) {
        let position = match self.positions.get(&resource.url) {
            Some(&position) => position,
            None => {
                self.candidates.push(Candidate {
                    resource: Arc::clone(resource),
                    score: 0,
                    locations: Vec::new(),
                });
                self.positions.insert(resource.url.clone(), self.candidates.len() - 1);
                self.candidates.len() - 1
            }
        };

        let candidate = &mut self.candidates[position];
        candidate.score += score;
        if !candidate
            .locations
            .iter()
            .any(|(w, d)| *w == week && d == day)
        {
            candidate.locations.push((week, day.to_string()));
        }
    }

    fn apply_day_context(&mut self, day_scores: &HashMap<(u32, String), u64>) {
        for candidate in &mut self.candidates {
            let boost: u64 = candidate
                .locations
                .iter()
                .filter_map(|location| day_scores.get(location))
                .sum();
            candidate.score += boost;
        }
    }

    fn finish(mut self, max_results: usize) -> Vec<ScoredResult> {
        // Stable sort: equal scores keep first-insertion order
        self.candidates.sort_by(|a, b| b.score.cmp(&a.score));
        self.candidates
            .into_iter()
            .filter(|c| c.score > 0)
            .take(max_results)
            .map(|c| ScoredResult {
                key: c.resource.url.clone(),
                score: c.score,
                resource: c.resource,
            })
            .collect()
    }
}

/// In-memory relevance search over course resources.
///
/// The index is built lazily from the content repository on first use, or
/// explicitly via [`ContentSearch::initialize_index`]. A rebuild constructs
/// the new index completely before swapping it in, so concurrent searches
/// see either the old or the new index.
pub struct ContentSearch {
    source: Arc<dyn ContentRepository>,
    options: SearchOptions,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    /// Serializes builds so a lazy build loads content once
    build_lock: Mutex<()>,
    metrics: MetricsTracker,
}

impl ContentSearch {
    /// Create a search engine that builds its index from `source` on demand.
    pub fn new(source: Arc<dyn ContentRepository>, options: SearchOptions) -> Self {
        Self {
            source,
            options: normalize(options),
            snapshot: RwLock::new(None),
            build_lock: Mutex::new(()),
            metrics: MetricsTracker::new(),
        }
    }

    /// Create a search engine over fixed in-memory content.
    pub fn from_content(content: CourseContent, options: SearchOptions) -> Self {
        Self::new(Arc::new(InMemoryContentRepository::new(content)), options)
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// (Re)build the index from the given content, replacing any previous index.
    ///
    /// On failure the previous index stays in place.
    pub async fn initialize_index(&self, content: &CourseContent) -> IndexResult<IndexStats> {
        let _guard = self.build_lock.lock().await;
        self.build_and_swap(content.clone())
            .await
            .map(|snapshot| snapshot.index.stats().clone())
    }

    /// Reload content from the repository and rebuild the index.
    pub async fn rebuild_from_source(&self) -> SearchResult<IndexStats> {
        let _guard = self.build_lock.lock().await;
        let snapshot = self.load_and_build().await?;
        Ok(snapshot.index.stats().clone())
    }

    /// Whether an index has been built.
    pub async fn is_initialized(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    /// Stats of the current index, if one has been built.
    pub async fn index_stats(&self) -> Option<IndexStats> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.index.stats().clone())
    }

    /// Course content the current index was built from, building it if needed.
    pub async fn content(&self) -> SearchResult<Arc<CourseContent>> {
        Ok(Arc::clone(&self.ensure_snapshot().await?.content))
    }

    /// Look up an indexed resource by URL, building the index if needed.
    pub async fn find_resource(&self, url: &str) -> SearchResult<Option<ResourceRef>> {
        let snapshot = self.ensure_snapshot().await?;
        Ok(snapshot.index.find_resource(url).cloned())
    }

    /// Rank resources for `query`, returning at most `max_results` of them.
    ///
    /// An empty result means nothing matched; failures are reported as errors.
    pub async fn search(&self, query: &str) -> SearchResult<Vec<ResourceRef>> {
        let results = self.search_with(SearchRequest::new(query)).await?;
        Ok(results.into_iter().map(|r| r.resource).collect())
    }

    /// Like [`search`](Self::search), restricted to one week.
    pub async fn search_in_week(&self, query: &str, week: u32) -> SearchResult<Vec<ResourceRef>> {
        let results = self
            .search_with(SearchRequest::new(query).in_week(week))
            .await?;
        Ok(results.into_iter().map(|r| r.resource).collect())
    }

    /// Like [`search`](Self::search), keeping the scores.
    pub async fn search_scored(&self, query: &str) -> SearchResult<Vec<ScoredResult>> {
        self.search_with(SearchRequest::new(query)).await
    }

    /// Like [`search`](Self::search), aborting with [`SearchError::Cancelled`]
    /// once `cancel` is set.
    pub async fn search_cancellable(
        &self,
        query: &str,
        cancel: &AtomicBool,
    ) -> SearchResult<Vec<ResourceRef>> {
        let results = self
            .search_with(SearchRequest::new(query).with_cancel(cancel))
            .await?;
        Ok(results.into_iter().map(|r| r.resource).collect())
    }

    /// Run a search request.
    pub async fn search_with(&self, request: SearchRequest<'_>) -> SearchResult<Vec<ScoredResult>> {
        let timer = Timer::new("content_search");
        let outcome = self.run(request).await;

        let duration_ms = timer.finish_with_status(outcome.is_ok());
        match &outcome {
            Ok(results) => self.metrics.track_search_query(duration_ms, results.len()),
            Err(SearchError::Cancelled) => self.metrics.track_search_cancelled(),
            Err(e) => {
                tracing::error!(query = %request.query, "Search failed: {}", e);
                self.metrics.track_search_failure();
            }
        }
        outcome
    }

    async fn run(&self, request: SearchRequest<'_>) -> SearchResult<Vec<ScoredResult>> {
        let terms = query_terms(request.query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.ensure_snapshot().await?;
        let mut ranking = Ranking::default();
        let mut day_scores: HashMap<(u32, String), u64> = HashMap::new();

        for batch in snapshot.index.entries().chunks(self.options.batch_size) {
            for entry in batch {
                if request.week.is_some_and(|week| week != entry.week()) {
                    continue;
                }

                let score = relevance_score(entry.searchable_text(), &terms);
                if score == 0 {
                    continue;
                }

                match entry.resource() {
                    Some(resource) => {
                        if request.exclude_url != Some(resource.url.as_str()) {
                            ranking.add(resource, score, entry.week(), entry.day());
                        }
                    }
                    None if self.options.include_day_context => {
                        *day_scores
                            .entry((entry.week(), entry.day().to_string()))
                            .or_default() += score;
                    }
                    None => {}
                }
            }

            tokio::task::yield_now().await;

            if request.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::debug!(query = %request.query, "Search cancelled");
                return Err(SearchError::Cancelled);
            }
        }

        if self.options.include_day_context {
            ranking.apply_day_context(&day_scores);
        }

        let results = ranking.finish(self.options.max_results);
        tracing::debug!(
            query = %request.query,
            result_count = results.len(),
            "Search completed"
        );
        Ok(results)
    }

    /// Current snapshot, building it from the repository when missing.
    async fn ensure_snapshot(&self) -> SearchResult<Arc<Snapshot>> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let _guard = self.build_lock.lock().await;

        // Another task may have built it while we waited
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        tracing::info!("Search index not initialized, building from content source");
        self.load_and_build().await
    }

    /// Must be called with `build_lock` held.
    async fn load_and_build(&self) -> SearchResult<Arc<Snapshot>> {
        let content = self.source.load().await.map_err(|e| {
            self.metrics.track_index_build(false);
            e
        })?;
        Ok(self.build_and_swap(content).await?)
    }

    /// Must be called with `build_lock` held.
    async fn build_and_swap(&self, content: CourseContent) -> IndexResult<Arc<Snapshot>> {
        let timer = Timer::new("index_build");

        let index = match ContentIndex::build(&content) {
            Ok(index) => index,
            Err(e) => {
                timer.finish_with_status(false);
                tracing::error!("Failed to build search index: {}", e);
                self.metrics.track_index_build(false);
                return Err(e);
            }
        };

        let duration_ms = timer.finish();
        tracing::info!(
            entries = index.len(),
            weeks = index.stats().week_count,
            duration_ms = duration_ms,
            "Search index built"
        );
        self.metrics.track_index_build(true);

        let snapshot = Arc::new(Snapshot {
            content: Arc::new(content),
            index,
        });
        *self.snapshot.write().await = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

/// Zero would stall the scan or make every search empty.
fn normalize(options: SearchOptions) -> SearchOptions {
    SearchOptions {
        batch_size: options.batch_size.max(1),
        max_results: options.max_results.max(1),
        ..options
    }
}
