use serde::Serialize;
use std::sync::Arc;

use crate::core::engine::{RankingEngine, RankingResult};
use crate::models::{Candidate, ScoredCandidate, SearchRequest, ViewportDirective};

/// The two presentation states
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// Full, unscored snapshot with a neutral viewport
    Idle,
    /// Filtered, scored and sorted subset with a search-derived viewport
    SearchActive(RankingResult),
}

/// What the presentation layer should show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    #[serde(rename = "isSearchActive")]
    pub is_search_active: bool,
    #[serde(flatten)]
    pub results: ViewResults,
    pub viewport: ViewportDirective,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ViewResults {
    Idle { reports: Vec<Candidate> },
    SearchActive { results: Vec<ScoredCandidate> },
}

impl ViewResults {
    pub fn len(&self) -> usize {
        match self {
            ViewResults::Idle { reports } => reports.len(),
            ViewResults::SearchActive { results } => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Idle/SearchActive state machine over one candidate snapshot
///
/// `search` moves to SearchActive (from either state, recomputing fully);
/// `reset` returns to Idle and drops the scores. There are no other transitions.
#[derive(Debug, Clone)]
pub struct SearchSession {
    engine: RankingEngine,
    snapshot: Arc<Vec<Candidate>>,
    state: SearchState,
}

impl SearchSession {
    pub fn new(engine: RankingEngine, snapshot: Arc<Vec<Candidate>>) -> Self {
        Self {
            engine,
            snapshot,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn snapshot(&self) -> &[Candidate] {
        &self.snapshot
    }

    pub fn is_search_active(&self) -> bool {
        matches!(self.state, SearchState::SearchActive(_))
    }

    /// The active ranking, or `None` while idle
    pub fn result(&self) -> Option<&RankingResult> {
        match &self.state {
            SearchState::SearchActive(result) => Some(result),
            SearchState::Idle => None,
        }
    }

    /// Run a search over the snapshot and enter SearchActive
    pub fn search(&mut self, request: &SearchRequest) {
        let result = self.engine.search(request, &self.snapshot);

        tracing::info!(
            "Search returned {} of {} reports",
            result.ranked.len(),
            result.total_candidates
        );

        self.state = SearchState::SearchActive(result);
    }

    /// Discard the current search and return to Idle
    pub fn reset(&mut self) {
        if self.is_search_active() {
            tracing::debug!("Search reset, restoring {} reports", self.snapshot.len());
        }
        self.state = SearchState::Idle;
    }

    /// Snapshot of what should be rendered for the current state
    pub fn view(&self) -> SessionView {
        match &self.state {
            SearchState::Idle => SessionView {
                is_search_active: false,
                results: ViewResults::Idle {
                    reports: self.snapshot.as_ref().clone(),
                },
                viewport: self.engine.fitter().neutral(),
            },
            SearchState::SearchActive(result) => SessionView {
                is_search_active: true,
                results: ViewResults::SearchActive {
                    results: result.ranked.clone(),
                },
                viewport: result.viewport,
            },
        }
    }
}
