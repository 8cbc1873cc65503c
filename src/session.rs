//! Observable catalog state for front ends
//!
//! A session holds the show list a front end displays. Every refresh starts a
//! new fetch cycle: the list is cleared at once and replaced wholesale when the
//! cycle completes. Cycles are numbered, and results of a cycle that has been
//! superseded by a newer one are discarded.

use crate::ProgressEvent;
use crate::catalog::{Catalog, TimeWindow};
use crate::metadata_retrieval::{CatalogApi, MetadataRetrievalError, Show, VideoPlatformApi};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// What a front end shows at one point in time
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Window of the most recently started cycle
    pub time_window: TimeWindow,
    pub shows: Vec<Show>,
    /// Show currently selected for detail display
    pub selected: Option<Show>,
    pub is_loading: bool,
    /// Failure of the most recent cycle, if it failed
    pub error: Option<Arc<MetadataRetrievalError>>,
}

/// Proof of having started a fetch cycle, needed to publish its result
#[derive(Debug)]
pub struct CycleTicket {
    generation: u64,
    window: TimeWindow,
}

impl CycleTicket {
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    state: SessionState,
}

/// Catalog state shared between a front end and its fetch cycles.
pub struct Session<C, V> {
    catalog: Catalog<C, V>,
    slot: Mutex<Slot>,
}

impl<C, V> Session<C, V>
where
    C: CatalogApi,
    V: VideoPlatformApi,
{
    pub fn new(catalog: Catalog<C, V>) -> Self {
        Self {
            catalog,
            slot: Mutex::new(Slot::default()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        // State is replaced in single assignments, so a poisoned lock still holds consistent data
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.slot().state.clone()
    }

    /// Starts a new cycle for `window`, invalidating all earlier ones.
    ///
    /// The show list, selection and error are cleared immediately.
    pub fn begin(&self, window: TimeWindow) -> CycleTicket {
        let mut slot = self.slot();
        slot.generation += 1;
        slot.state = SessionState {
            time_window: window,
            is_loading: true,
            ..SessionState::default()
        };

        tracing::info!(generation = slot.generation, %window, "fetch cycle started");
        CycleTicket {
            generation: slot.generation,
            window,
        }
    }

    /// Publishes the result of a cycle.
    ///
    /// Returns `false` and leaves the state untouched if a newer cycle has
    /// been started since `ticket` was issued.
    pub fn complete(
        &self,
        ticket: CycleTicket,
        result: Result<Vec<Show>, MetadataRetrievalError>,
    ) -> bool {
        let mut slot = self.slot();
        if slot.generation != ticket.generation {
            tracing::info!(
                generation = ticket.generation,
                current = slot.generation,
                "discarding superseded fetch cycle"
            );
            return false;
        }

        let state = &mut slot.state;
        state.is_loading = false;
        match result {
            Ok(shows) => {
                state.selected = shows.first().cloned();
                state.shows = shows;
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch cycle failed");
                state.error = Some(Arc::new(e));
            }
        }
        true
    }

    /// Runs a full cycle for `window` on the calling thread.
    ///
    /// Returns whether its result was published.
    pub fn refresh<F>(&self, window: TimeWindow, progress_callback: F) -> bool
    where
        F: FnMut(ProgressEvent),
    {
        let ticket = self.begin(window);
        let result = self.catalog.fetch_top_shows(ticket.window(), progress_callback);
        self.complete(ticket, result)
    }

    /// Selects one of the current shows by id.
    ///
    /// Returns `false` if no current show has that id.
    pub fn select(&self, show_id: u64) -> bool {
        let mut slot = self.slot();
        let state = &mut slot.state;
        match state.shows.iter().find(|show| show.id == show_id) {
            Some(show) => {
                state.selected = Some(show.clone());
                true
            }
            None => false,
        }
    }
}

impl<C, V> Session<C, V>
where
    C: CatalogApi + Send + Sync + 'static,
    V: VideoPlatformApi + Send + Sync + 'static,
{
    /// Runs a full cycle for `window` on a background thread.
    ///
    /// The state is cleared before this returns. The handle yields whether the
    /// cycle's result was published.
    pub fn spawn_refresh<F>(
        self: &Arc<Self>,
        window: TimeWindow,
        progress_callback: F,
    ) -> JoinHandle<bool>
    where
        F: FnMut(ProgressEvent) + Send + 'static,
    {
        let ticket = self.begin(window);
        let session = Arc::clone(self);
        thread::spawn(move || {
            let result = session
                .catalog
                .fetch_top_shows(ticket.window(), progress_callback);
            session.complete(ticket, result)
        })
    }
}
