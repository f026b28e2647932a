//! Query controller: the single owner of search state.
//!
//! [`QueryController`] holds the canonical [`SearchQuery`], the last accepted
//! [`SearchResult`], and the sequence counter that orders fetches. Setters
//! only change state; the caller decides whether to follow up with
//! [`QueryController::refetch`].
//!
//! # Ordering
//!
//! Fetches are never cancelled, so responses may arrive out of order. Every
//! request carries a sequence number and [`QueryController::complete`] drops
//! any response older than the most recently issued request.

use crate::domain::{Result, SearchQuery, SearchResult, SortOrder, ViewMode};
use crate::github::{build_search_request, FetchOutcome, SearchRequest, UpstreamConfig};

/// Owns the search query, the current result page, and fetch ordering.
#[derive(Debug, Clone)]
pub struct QueryController {
    query: SearchQuery,
    result: SearchResult,
    upstream: UpstreamConfig,
    /// Sequence number of the most recently issued request.
    latest_seq: u64,
    /// Set while the most recently issued request is outstanding.
    pending_seq: Option<u64>,
}

impl QueryController {
    /// Creates a controller seeded with `query` and no results.
    #[must_use]
    pub fn new(query: SearchQuery, upstream: UpstreamConfig) -> Self {
        Self {
            query,
            result: SearchResult::empty(),
            upstream,
            latest_seq: 0,
            pending_seq: None,
        }
    }

    /// Current query.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Last accepted result page.
    #[must_use]
    pub const fn result(&self) -> &SearchResult {
        &self.result
    }

    /// Whether the most recent fetch is still outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_seq.is_some()
    }

    /// Number of pages in the current result, 0 before any results arrive.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.result.total_pages()
    }

    /// Replaces the query text. Does not fetch.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    /// Mutable access to the raw query text for in-place editing.
    pub fn query_text_mut(&mut self) -> &mut String {
        &mut self.query.text
    }

    /// Sets the page, clamped to `[1, total_pages]` once a total is known.
    ///
    /// Returns the page actually stored.
    pub fn set_page(&mut self, page: u32) -> u32 {
        let total = self.total_pages();
        let upper = if total == 0 { u32::MAX } else { total };
        self.query.page = page.clamp(1, upper);
        self.query.page
    }

    /// Sets the sort order. Does not fetch.
    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        self.query.sort = sort;
    }

    /// Sets the result layout. Never fetches: the layout only affects how the
    /// already-fetched page is rendered.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.query.view_mode = view_mode;
    }

    /// Builds the request for the current query and marks it outstanding.
    ///
    /// Returns `Ok(None)` without issuing anything when the normalized text
    /// is empty; the current results are cleared in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if the request URL cannot be built from the
    /// configured API base.
    pub fn refetch(&mut self) -> Result<Option<SearchRequest>> {
        if !self.query.has_text() {
            tracing::debug!("empty query, clearing results without fetching");
            self.result = SearchResult::empty();
            self.pending_seq = None;
            return Ok(None);
        }

        let seq = self.latest_seq + 1;
        let request = build_search_request(&self.upstream, &self.query, seq)?;

        self.latest_seq = seq;
        self.pending_seq = Some(seq);

        tracing::debug!(
            seq = seq,
            query = %self.query.normalized_text(),
            sort = ?self.query.sort,
            page = self.query.page,
            "search request issued"
        );

        Ok(Some(request))
    }

    /// Applies a completed fetch.
    ///
    /// Returns `true` if the outcome replaced the current result, `false` if
    /// it was discarded as stale. An accepted result pulls the page back to
    /// its last page when the page was past the end.
    pub fn complete(&mut self, seq: u64, outcome: FetchOutcome) -> bool {
        if seq != self.latest_seq || self.pending_seq != Some(seq) {
            tracing::debug!(
                seq = seq,
                latest_seq = self.latest_seq,
                "discarding stale search response"
            );
            return false;
        }

        if let FetchOutcome::Failed(failure) = &outcome {
            tracing::warn!(seq = seq, failure = ?failure, "search failed, showing empty results");
        }

        self.result = outcome.into_result();
        self.pending_seq = None;

        let total = self.total_pages();
        if total > 0 && self.query.page > total {
            tracing::debug!(page = self.query.page, total_pages = total, "page past last page, clamping");
            self.query.page = total;
        }

        tracing::debug!(
            seq = seq,
            items = self.result.items.len(),
            total_count = self.result.total_count,
            "search results applied"
        );

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositorySummary;
    use crate::github::FetchFailure;

    fn controller(text: &str) -> QueryController {
        QueryController::new(
            SearchQuery {
                text: text.to_string(),
                ..SearchQuery::default()
            },
            UpstreamConfig::default(),
        )
    }

    fn page_of(names: &[&str], total_count: u64) -> FetchOutcome {
        FetchOutcome::Results(SearchResult {
            items: names
                .iter()
                .map(|n| RepositorySummary {
                    full_name: (*n).to_string(),
                    ..RepositorySummary::default()
                })
                .collect(),
            total_count,
        })
    }

    #[test]
    fn refetch_marks_loading_until_completion() {
        let mut c = controller("rust");
        let request = c.refetch().unwrap().unwrap();
        assert!(c.is_loading());
        assert!(c.complete(request.context.seq, page_of(&["a/b"], 1)));
        assert!(!c.is_loading());
        assert_eq!(c.result().items.len(), 1);
    }

    #[test]
    fn empty_query_issues_nothing_and_clears_results() {
        let mut c = controller("rust");
        let seq = c.refetch().unwrap().unwrap().context.seq;
        c.complete(seq, page_of(&["a/b"], 1));

        c.set_query("   ");
        assert!(c.refetch().unwrap().is_none());
        assert!(c.result().is_empty());
        assert!(!c.is_loading());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut c = controller("ru");
        let first = c.refetch().unwrap().unwrap().context.seq;
        c.set_query("rust");
        let second = c.refetch().unwrap().unwrap().context.seq;
        assert!(second > first);

        assert!(c.complete(second, page_of(&["new/one"], 1)));
        assert!(!c.complete(first, page_of(&["old/one"], 1)));
        assert_eq!(c.result().items[0].full_name, "new/one");
    }

    #[test]
    fn older_response_arriving_first_does_not_clear_loading() {
        let mut c = controller("ru");
        let first = c.refetch().unwrap().unwrap().context.seq;
        let second = c.refetch().unwrap().unwrap().context.seq;

        assert!(!c.complete(first, page_of(&["old/one"], 1)));
        assert!(c.is_loading());
        assert!(c.complete(second, page_of(&["new/one"], 1)));
        assert!(!c.is_loading());
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut c = controller("rust");
        let seq = c.refetch().unwrap().unwrap().context.seq;
        assert!(c.complete(seq, page_of(&["a/b"], 1)));
        assert!(!c.complete(seq, page_of(&[], 0)));
        assert_eq!(c.result().items.len(), 1);
    }

    #[test]
    fn failure_renders_as_empty_result() {
        let mut c = controller("rust");
        let seq = c.refetch().unwrap().unwrap().context.seq;
        assert!(c.complete(seq, FetchOutcome::Failed(FetchFailure::Status(500))));
        assert!(c.result().is_empty());
        assert_eq!(c.total_pages(), 0);
    }

    #[test]
    fn page_is_clamped_to_known_total() {
        let mut c = controller("rust");
        let seq = c.refetch().unwrap().unwrap().context.seq;
        c.complete(seq, page_of(&["a/b"], 250));
        assert_eq!(c.total_pages(), 3);
        assert_eq!(c.set_page(0), 1);
        assert_eq!(c.set_page(7), 3);
        assert_eq!(c.set_page(2), 2);
    }

    #[test]
    fn accepted_result_pulls_page_back_to_last_page() {
        let mut c = QueryController::new(
            SearchQuery {
                text: "rust".to_string(),
                page: 5,
                ..SearchQuery::default()
            },
            UpstreamConfig::default(),
        );
        let seq = c.refetch().unwrap().unwrap().context.seq;
        c.complete(seq, page_of(&[], 250));
        assert_eq!(c.query().page, 3);

        let request = c.refetch().unwrap().unwrap();
        assert!(request.url.ends_with("page=3"), "{}", request.url);
    }

    #[test]
    fn failed_result_leaves_page_alone() {
        let mut c = controller("rust");
        c.set_page(4);
        let seq = c.refetch().unwrap().unwrap().context.seq;
        c.complete(seq, FetchOutcome::Failed(FetchFailure::Status(502)));
        assert_eq!(c.query().page, 4);
    }

    #[test]
    fn page_is_unbounded_above_before_results() {
        let mut c = controller("rust");
        assert_eq!(c.set_page(5), 5);
        assert_eq!(c.set_page(0), 1);
    }

    #[test]
    fn view_mode_change_does_not_touch_fetch_state() {
        let mut c = controller("rust");
        let seq = c.refetch().unwrap().unwrap().context.seq;
        c.complete(seq, page_of(&["a/b"], 1));

        c.set_view_mode(ViewMode::Table);
        assert!(!c.is_loading());
        assert_eq!(c.query().view_mode, ViewMode::Table);
        assert_eq!(c.result().items.len(), 1);
    }
}
