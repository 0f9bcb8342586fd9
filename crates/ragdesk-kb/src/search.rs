//! Search screen state: request identity, result set, query history

use ragdesk_core::SearchHit;

use crate::demo;
use crate::requests::{RequestId, RequestTracker};

/// Maximum entries kept in the query history
pub const HISTORY_LIMIT: usize = 10;

/// Owned state behind the search screen
///
/// A new search may be issued while an earlier one is still in flight;
/// the newer search supersedes it and the older result set is discarded
/// when it eventually arrives. History records only searches that
/// actually delivered results.
#[derive(Debug, Default)]
pub struct SearchSession {
    history: Vec<String>,
    results: Vec<SearchHit>,
    tracker: RequestTracker,
    pending_query: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session with the console's pre-filled history
    pub fn with_demo_history() -> Self {
        Self {
            history: demo::search_history(),
            ..Self::default()
        }
    }

    /// Issue a search. Blank queries are ignored and return None; otherwise
    /// the returned id must be passed back to [`complete`](Self::complete)
    /// with the backend's hits.
    pub fn begin(&mut self, query: &str) -> Option<RequestId> {
        if query.trim().is_empty() {
            return None;
        }
        let id = self.tracker.begin();
        self.pending_query = Some(query.to_string());
        tracing::debug!("Search {} issued for {:?}", id, query);
        Some(id)
    }

    /// Deliver results for an issued search. Stale ids return false and
    /// change nothing; the latest id installs the hits and records the
    /// query in history.
    pub fn complete(&mut self, id: RequestId, hits: Vec<SearchHit>) -> bool {
        if !self.tracker.finish(id) {
            tracing::debug!("Dropping stale search response {}", id);
            return false;
        }
        self.results = hits;
        if let Some(query) = self.pending_query.take() {
            self.push_history(query);
        }
        true
    }

    /// Settle an issued search without results, used when the backend
    /// errored. Returns false for stale ids.
    pub fn abandon(&mut self, id: RequestId) -> bool {
        let settled = self.tracker.finish(id);
        if settled {
            self.pending_query = None;
        }
        settled
    }

    /// Drop the in-flight search, if any
    pub fn cancel(&mut self) {
        self.tracker.cancel();
        self.pending_query = None;
    }

    pub fn is_searching(&self) -> bool {
        self.tracker.in_flight()
    }

    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Prepend the query unless it is already present, capping the list
    fn push_history(&mut self, query: String) {
        if self.history.contains(&query) {
            return;
        }
        self.history.insert(0, query);
        self.history.truncate(HISTORY_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            title: format!("標題{}", id),
            content: String::new(),
            document: "文檔.pdf".to_string(),
            score: 0.5,
            highlights: Vec::new(),
            page: None,
        }
    }

    #[test]
    fn blank_query_issues_nothing() {
        let mut session = SearchSession::new();
        assert_eq!(session.begin(""), None);
        assert_eq!(session.begin("   "), None);
        assert!(!session.is_searching());
    }

    #[test]
    fn completed_search_installs_results_and_history() {
        let mut session = SearchSession::new();
        let id = session.begin("年假").unwrap();
        assert!(session.is_searching());

        assert!(session.complete(id, vec![hit("1"), hit("2")]));
        assert!(!session.is_searching());
        assert_eq!(session.results().len(), 2);
        assert_eq!(session.history(), ["年假"]);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut session = SearchSession::new();
        let first = session.begin("舊查詢").unwrap();
        let second = session.begin("新查詢").unwrap();

        assert!(!session.complete(first, vec![hit("old")]));
        assert!(session.results().is_empty());

        assert!(session.complete(second, vec![hit("new")]));
        assert_eq!(session.results()[0].id, "new");
        // only the search that delivered results is remembered
        assert_eq!(session.history(), ["新查詢"]);
    }

    #[test]
    fn cancelled_search_never_lands() {
        let mut session = SearchSession::new();
        let id = session.begin("查詢").unwrap();
        session.cancel();

        assert!(!session.complete(id, vec![hit("1")]));
        assert!(session.results().is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn repeated_query_is_not_duplicated() {
        let mut session = SearchSession::with_demo_history();
        let before = session.history().to_vec();

        let id = session.begin("API接口文檔").unwrap();
        session.complete(id, Vec::new());

        assert_eq!(session.history(), &before[..]);
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let mut session = SearchSession::new();
        for n in 0..12 {
            let query = format!("查詢{}", n);
            let id = session.begin(&query).unwrap();
            session.complete(id, Vec::new());
        }

        assert_eq!(session.history().len(), HISTORY_LIMIT);
        assert_eq!(session.history()[0], "查詢11");
        // the two oldest fell off
        assert!(!session.history().contains(&"查詢0".to_string()));
        assert!(!session.history().contains(&"查詢1".to_string()));
    }

    #[test]
    fn abandoned_search_keeps_previous_results() {
        let mut session = SearchSession::new();
        let id = session.begin("第一").unwrap();
        session.complete(id, vec![hit("1")]);

        let id = session.begin("第二").unwrap();
        assert!(session.abandon(id));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.history(), ["第一"]);
        assert!(!session.is_searching());
    }
}
