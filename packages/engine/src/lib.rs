#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The incident engine: store, filtering, view synchronization, and the
//! recurring refresh lifecycle.
//!
//! [`Engine`] is an explicit instance with a controlled lifecycle — no
//! ambient singleton. [`Engine::start`] owns timer registration,
//! [`Engine::stop`] cancels it, leaving no dangling scheduled work. All
//! core logic is single-threaded in spirit: the only suspension points are
//! the network operations, and every derived view is a pure function of
//! the store's collection.

pub mod filter;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;
pub mod view;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use resq_map_incident_models::{Incident, IncidentStatus, StatusFilter};
use resq_map_source::IncidentApi;
use tokio::task::JoinHandle;

pub use filter::filter_incidents;
pub use resq_map_triage::{classify, resolve_location};
pub use store::{IncidentStore, StoreObservation};
pub use view::{Marker, MarkerDiff, ViewState, build_markers, diff_markers};

/// How often the recurring timer refreshes the store.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Reads the refresh interval from `RESQ_REFRESH_SECS`, falling back to
/// [`DEFAULT_REFRESH_INTERVAL`] when unset or unparseable.
#[must_use]
pub fn refresh_interval_from_env() -> Duration {
    std::env::var("RESQ_REFRESH_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map_or(DEFAULT_REFRESH_INTERVAL, Duration::from_secs)
}

/// Owns an [`IncidentStore`] and its recurring refresh timer.
pub struct Engine<A> {
    store: Arc<IncidentStore<A>>,
    refresh_interval: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<A: IncidentApi + 'static> Engine<A> {
    /// Creates an engine over the given transport with the default
    /// refresh interval. The store stays empty until [`Self::start`] or
    /// [`Self::refresh`] is called.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            store: Arc::new(IncidentStore::new(api)),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            timer: Mutex::new(None),
        }
    }

    /// Overrides the recurring refresh interval.
    #[must_use]
    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Performs an initial refresh, then schedules recurring refreshes.
    ///
    /// The timer is additive to operator-triggered refreshes. Calling
    /// `start` again restarts the timer (the previous one is cancelled
    /// first), so the engine never runs two timers at once.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if the timer mutex is poisoned.
    pub async fn start(&self) {
        self.stop();
        self.store.refresh().await;

        let store = Arc::clone(&self.store);
        let interval = self.refresh_interval;
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                ticker.tick().await;
                store.refresh().await;
            }
        });

        *self.lock_timer() = Some(handle);
    }

    /// Cancels the recurring refresh timer, if one is running.
    ///
    /// # Panics
    ///
    /// Panics if the timer mutex is poisoned.
    pub fn stop(&self) {
        if let Some(handle) = self.lock_timer().take() {
            handle.abort();
            log::debug!("Cancelled recurring refresh timer");
        }
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().expect("engine timer mutex poisoned")
    }

    /// The underlying store, for callers that need shared ownership.
    #[must_use]
    pub const fn store(&self) -> &Arc<IncidentStore<A>> {
        &self.store
    }

    /// Operator-triggered refresh. See [`IncidentStore::refresh`].
    pub async fn refresh(&self) {
        self.store.refresh().await;
    }

    /// See [`IncidentStore::update_status`].
    pub async fn update_status(&self, id: &str, status: IncidentStatus) {
        self.store.update_status(id, status).await;
    }

    /// See [`IncidentStore::delete_incident`].
    pub async fn delete_incident(&self, id: &str) {
        self.store.delete_incident(id).await;
    }

    /// See [`IncidentStore::visible_incidents`].
    #[must_use]
    pub fn visible_incidents(&self, filter: StatusFilter) -> Vec<Incident> {
        self.store.visible_incidents(filter)
    }

    /// See [`IncidentStore::incident`].
    #[must_use]
    pub fn incident(&self, id: &str) -> Option<Incident> {
        self.store.incident(id)
    }

    /// See [`IncidentStore::observe`].
    #[must_use]
    pub fn observe(&self) -> StoreObservation {
        self.store.observe()
    }
}

impl<A> Drop for Engine<A> {
    fn drop(&mut self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{MockApi, payload};

    use super::*;

    #[tokio::test]
    async fn start_refreshes_immediately_and_on_interval() {
        let api = Arc::new(MockApi::new());
        api.push_list(Ok(payload(&[("a", "active")])));
        let engine =
            Engine::new(Arc::clone(&api)).with_refresh_interval(Duration::from_millis(20));

        engine.start().await;
        assert_eq!(engine.visible_incidents(StatusFilter::All).len(), 1);
        assert_eq!(api.list_calls(), 1);

        tokio::time::sleep(Duration::from_millis(70)).await;
        engine.stop();

        // Initial refresh plus at least two timer ticks.
        assert!(api.list_calls() >= 3, "calls: {}", api.list_calls());
    }

    #[tokio::test]
    async fn timer_stops_cleanly() {
        let api = Arc::new(MockApi::new());
        let engine =
            Engine::new(Arc::clone(&api)).with_refresh_interval(Duration::from_millis(10));

        engine.start().await;
        tokio::time::sleep(Duration::from_millis(35)).await;
        engine.stop();

        let calls_after_stop = api.list_calls();
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(api.list_calls(), calls_after_stop);
    }

    #[tokio::test]
    async fn restart_replaces_timer() {
        let api = Arc::new(MockApi::new());
        api.push_list(Ok(payload(&[("a", "active")])));
        api.push_list(Ok(payload(&[("b", "active")])));
        let engine =
            Engine::new(Arc::clone(&api)).with_refresh_interval(Duration::from_secs(3600));

        engine.start().await;
        assert_eq!(engine.visible_incidents(StatusFilter::All)[0].id, "a");

        engine.start().await;
        assert_eq!(engine.visible_incidents(StatusFilter::All)[0].id, "b");
        engine.stop();
        assert_eq!(api.list_calls(), 2);
    }
}
