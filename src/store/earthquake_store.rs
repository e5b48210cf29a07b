//! In-memory earthquake store.
//!
//! The store owns two collections: `all`, the last successfully fetched
//! feed in feed order, and `visible`, the view derived from it by the most
//! recent sort or search. Every change is published as a [`StoreSnapshot`]
//! on a `watch` channel so the UI can re-render from a consistent copy.
//!
//! Overlapping fetches are sequenced. Each [`EarthquakeStore::fetch_all`]
//! call cancels the one still in flight and takes a fresh request id; an
//! outcome whose id is not newer than the last applied one is dropped, so
//! a slow response can never overwrite fresher data.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{Earthquake, ErrorKind};
use crate::fetcher::FeedClient;
use crate::normalizer::Normalizer;
use crate::store::{classify, FeedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Largest magnitude first.
    Magnitude,
    /// Most recent first.
    Date,
}

/// How `visible` was derived from `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub sort: Option<SortKey>,
    pub query: Option<String>,
}

/// Result of one `fetch_all` call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Vec<Earthquake>),
    Failure(ErrorKind),
    /// Cancelled, superseded by a newer request, or the store was closed.
    /// Nothing was applied.
    Discarded,
}

/// Everything an observer needs to render the current state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub visible: Vec<Earthquake>,
    /// Number of earthquakes in the full feed.
    pub total: usize,
    pub view: ViewState,
    /// Latest failure; cleared by the next successful fetch.
    pub error: Option<ErrorKind>,
    pub fetching: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct StoreState {
    all: Vec<Earthquake>,
    visible: Vec<Earthquake>,
    view: ViewState,
    error: Option<ErrorKind>,
    last_updated: Option<DateTime<Utc>>,
    next_request: u64,
    last_applied: u64,
    in_flight: Option<(u64, CancellationToken)>,
    closed: bool,
}

impl StoreState {
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            visible: self.visible.clone(),
            total: self.all.len(),
            view: self.view.clone(),
            error: self.error.clone(),
            fetching: self.in_flight.is_some(),
            last_updated: self.last_updated,
        }
    }
}

pub struct EarthquakeStore {
    client: Arc<dyn FeedClient + Send + Sync>,
    normalizer: Normalizer,
    state: Mutex<StoreState>,
    snapshots: watch::Sender<StoreSnapshot>,
}

impl EarthquakeStore {
    pub fn new(client: Arc<dyn FeedClient + Send + Sync>) -> Self {
        let (snapshots, _) = watch::channel(StoreSnapshot::default());
        Self {
            client,
            normalizer: Normalizer::new(),
            state: Mutex::new(StoreState::default()),
            snapshots,
        }
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn visible(&self) -> Vec<Earthquake> {
        self.lock().visible.clone()
    }

    /// The full feed, in feed order.
    pub fn all(&self) -> Vec<Earthquake> {
        self.lock().all.clone()
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.lock().error.clone()
    }

    /// Earthquake at `index` in the visible view.
    pub fn get(&self, index: usize) -> Option<Earthquake> {
        self.lock().visible.get(index).cloned()
    }

    /// Pulls the whole feed and replaces both collections with it.
    ///
    /// On failure the collections are left untouched and the classified
    /// error is published instead. Never panics and never returns an `Err`:
    /// the outcome says what happened.
    pub async fn fetch_all(&self) -> FetchOutcome {
        let Some((request_id, token)) = self.begin_request() else {
            debug!("Store closed, ignoring fetch request");
            return FetchOutcome::Discarded;
        };

        let _guard = RequestGuard {
            store: self,
            request_id,
        };

        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.load() => Some(result),
        };

        match result {
            Some(result) => self.settle(request_id, result),
            None => {
                debug!(request_id, "Fetch cancelled");
                FetchOutcome::Discarded
            }
        }
    }

    /// Reorders `visible` in place. Ties keep their current relative order.
    pub fn sort(&self, key: SortKey) {
        self.update(|state| {
            match key {
                SortKey::Magnitude => state
                    .visible
                    .sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude)),
                SortKey::Date => state
                    .visible
                    .sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at)),
            }
            state.view.sort = Some(key);
        });
    }

    /// Shows the earthquakes whose place contains `query`, ignoring case,
    /// in feed order. A blank query is the same as [`reset_search`].
    ///
    /// Always filters `all`, so any earlier sort is dropped.
    ///
    /// [`reset_search`]: EarthquakeStore::reset_search
    pub fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.reset_search();
            return;
        }

        let needle = query.to_lowercase();
        self.update(|state| {
            state.visible = state
                .all
                .iter()
                .filter(|quake| quake.place_contains(&needle))
                .cloned()
                .collect();
            state.view = ViewState {
                sort: None,
                query: Some(query.to_string()),
            };
        });
    }

    /// Restores `visible` to the full feed in feed order.
    pub fn reset_search(&self) {
        self.update(|state| {
            state.visible = state.all.clone();
            state.view = ViewState::default();
        });
    }

    /// Ends the session: cancels any outstanding fetch and ignores later
    /// ones. Data already held stays readable.
    pub fn close(&self) {
        self.update(|state| {
            state.closed = true;
            if let Some((request_id, token)) = state.in_flight.take() {
                debug!(request_id, "Cancelling fetch on close");
                token.cancel();
            }
        });
    }

    async fn load(&self) -> Result<Vec<Earthquake>, FeedError> {
        let body = self.client.fetch().await?;
        Ok(self.normalizer.normalize(&body)?)
    }

    fn begin_request(&self) -> Option<(u64, CancellationToken)> {
        let mut state = self.lock();
        if state.closed {
            return None;
        }

        state.next_request += 1;
        let request_id = state.next_request;
        let token = CancellationToken::new();

        if let Some((previous, previous_token)) = state.in_flight.replace((request_id, token.clone())) {
            debug!(previous, request_id, "Superseding in-flight fetch");
            previous_token.cancel();
        }

        self.publish(&state);
        Some((request_id, token))
    }

    fn finish_request(&self, request_id: u64) {
        let mut state = self.lock();
        if Self::clear_in_flight(&mut state, request_id) {
            self.publish(&state);
        }
    }

    fn clear_in_flight(state: &mut StoreState, request_id: u64) -> bool {
        match state.in_flight {
            Some((current, _)) if current == request_id => {
                state.in_flight = None;
                true
            }
            _ => false,
        }
    }

    fn settle(
        &self,
        request_id: u64,
        result: Result<Vec<Earthquake>, FeedError>,
    ) -> FetchOutcome {
        let mut state = self.lock();
        let was_in_flight = Self::clear_in_flight(&mut state, request_id);

        if request_id <= state.last_applied {
            debug!(
                request_id,
                last_applied = state.last_applied,
                "Discarding stale fetch result"
            );
            if was_in_flight {
                self.publish(&state);
            }
            return FetchOutcome::Discarded;
        }
        state.last_applied = request_id;

        let outcome = match result {
            Ok(quakes) => {
                info!(request_id, count = quakes.len(), "Loaded earthquake feed");
                state.all = quakes.clone();
                state.visible = quakes.clone();
                state.view = ViewState::default();
                state.error = None;
                state.last_updated = Some(Utc::now());
                FetchOutcome::Success(quakes)
            }
            Err(err) => {
                let kind = classify(&err);
                warn!(request_id, error = %err, "Earthquake feed fetch failed");
                state.error = Some(kind.clone());
                FetchOutcome::Failure(kind)
            }
        };

        self.publish(&state);
        outcome
    }

    fn update(&self, apply: impl FnOnce(&mut StoreState)) {
        let mut state = self.lock();
        apply(&mut state);
        self.publish(&state);
    }

    fn publish(&self, state: &StoreState) {
        self.snapshots.send_replace(state.snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the in-flight marker when a `fetch_all` future finishes or is
/// dropped before completing. A no-op once the request has settled.
struct RequestGuard<'a> {
    store: &'a EarthquakeStore,
    request_id: u64,
}

impl Drop for RequestGuard<'_> {
    fn drop(&mut self) {
        self.store.finish_request(self.request_id);
    }
}

impl Drop for EarthquakeStore {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some((_, token)) = state.in_flight.take() {
            token.cancel();
        }
    }
}
