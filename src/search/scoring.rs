//! Term-frequency relevance scoring.
//!
//! A query is split into lowercase whitespace-separated terms; an entry's
//! score is the total number of literal substring occurrences of every term
//! in the entry's searchable text. Terms are never interpreted as patterns.

/// Split a raw query into lowercase terms, discarding empty ones.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Count non-overlapping literal occurrences of `term` in `text`.
pub fn term_frequency(text: &str, term: &str) -> u64 {
    if term.is_empty() {
        return 0;
    }
    text.matches(term).count() as u64
}

/// Score already-lowercased `text` against pre-split query terms.
///
/// Zero means no match.
pub fn relevance_score(text: &str, terms: &[String]) -> u64 {
    terms.iter().map(|term| term_frequency(text, term)).sum()
}

/// Score `text` against a raw query string.
pub fn score_query(text: &str, query: &str) -> u64 {
    relevance_score(text, &query_terms(query))
}
