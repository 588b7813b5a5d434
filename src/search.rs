// src/search.rs

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

use crate::error::ResolutionError;
use crate::geopoint::{Coordinate, WeightedPoint};
use crate::heat;
use crate::resolver::{Geocoder, LocationResolver, ResolvedLocation};
use crate::view::PageView;

/// A resolved location together with its heat points.
///
/// `points` is never empty and its first entry sits on `center`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchResult {
    pub center: Coordinate,
    pub label: String,
    pub points: Vec<WeightedPoint>,
}

impl SearchResult {
    pub fn from_location(location: ResolvedLocation) -> Self {
        SearchResult {
            center: location.center,
            points: heat::generate(location.center),
            label: location.label,
        }
    }
}

/// Lifecycle of the most recent search.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Resolved(SearchResult),
    Failed(ResolutionError),
}

/// Everything a view needs to draw the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSnapshot {
    pub query: String,
    pub state: SearchState,
    /// The live result shown on the map. Kept while a later search is loading or
    /// has failed, and replaced wholesale on the next success.
    pub displayed: Option<SearchResult>,
}

impl SearchSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    pub fn error(&self) -> Option<&ResolutionError> {
        match &self.state {
            SearchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// What a single call to [`SearchViewModel::search`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was sent and state is unchanged.
    Skipped,
    /// The search completed and its result is now displayed.
    Resolved,
    /// The search completed with an error, now held in state.
    Failed(ResolutionError),
    /// A newer search was started meanwhile; this completion was discarded.
    Stale { request_id: u64 },
}

/// Drives the search page: holds the query and search state, resolves queries,
/// and publishes snapshots to subscribers.
///
/// Overlapping searches are allowed. Each call gets a monotonically increasing
/// request id and only the most recently issued one may update state.
pub struct SearchViewModel<G> {
    resolver: LocationResolver<G>,
    state: watch::Sender<SearchSnapshot>,
    latest_request: AtomicU64,
}

impl<G: Geocoder> SearchViewModel<G> {
    pub fn new(resolver: LocationResolver<G>) -> Self {
        SearchViewModel {
            resolver,
            state: watch::Sender::new(SearchSnapshot::default()),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn resolver(&self) -> &LocationResolver<G> {
        &self.resolver
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    /// The page description for the current state.
    pub fn render(&self) -> PageView {
        PageView::render(&self.state.borrow())
    }

    /// Replaces the pending query text. Never starts a search.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|snapshot| snapshot.query = text);
    }

    /// Resolves the current query and publishes the outcome.
    pub async fn search(&self) -> SearchOutcome {
        let query = self.state.borrow().query.trim().to_string();
        if query.is_empty() {
            log::debug!("Ignoring search with empty query");
            return SearchOutcome::Skipped;
        }

        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .send_modify(|snapshot| snapshot.state = SearchState::Loading);
        log::debug!("Search #{} started for '{}'", request_id, query);

        let resolution = self.resolver.resolve(&query).await;

        let latest = self.latest_request.load(Ordering::SeqCst);
        if latest != request_id {
            log::debug!(
                "Discarding result of search #{} for '{}'; #{} is newer",
                request_id,
                query,
                latest
            );
            return SearchOutcome::Stale { request_id };
        }

        match resolution {
            Ok(location) => {
                let result = SearchResult::from_location(location);
                log::info!("Showing disease risk for {}", result.label);
                self.state.send_modify(|snapshot| {
                    snapshot.displayed = Some(result.clone());
                    snapshot.state = SearchState::Resolved(result);
                });
                SearchOutcome::Resolved
            }
            Err(err) => {
                log::warn!("Search #{} for '{}' failed: {:?}", request_id, query, err);
                let outcome = SearchOutcome::Failed(err.clone());
                self.state
                    .send_modify(|snapshot| snapshot.state = SearchState::Failed(err));
                outcome
            }
        }
    }
}
