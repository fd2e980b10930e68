//! The authoritative in-memory incident collection.
//!
//! The store is the only component that mutates the collection. Refreshes
//! replace it wholesale — the store favors periodic convergence with the
//! service over partial incremental updates. Status mutations are applied
//! optimistically and superseded unconditionally by the next authoritative
//! refresh; provisional and authoritative incidents share the same
//! representation so reconciliation is trivial.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use resq_map_incident_models::{Incident, IncidentStatus, StatusFilter};
use resq_map_source::{IncidentApi, normalize_all};

use crate::filter::filter_incidents;

/// Snapshot of the store's observable error/loading state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreObservation {
    /// Whether a refresh is currently in flight.
    pub loading: bool,
    /// Operator-facing message from the most recent failed operation.
    pub error: Option<String>,
    /// Non-fatal warning (e.g., malformed payload emptied the collection).
    pub warning: Option<String>,
    /// Total number of incidents currently held.
    pub total: usize,
}

#[derive(Default)]
struct StoreState {
    incidents: Vec<Incident>,
    loading: bool,
    error: Option<String>,
    warning: Option<String>,
    /// Sequence number of the most recently *initiated* refresh.
    refresh_seq: u64,
    /// Sequence number of the most recently *applied* refresh.
    applied_seq: u64,
}

/// Holds the current incident collection plus error/loading state.
///
/// All mutation goes through the store; derived views (priority, location,
/// filtered sets, markers) are pure functions of the collection and never
/// mutate it. The internal lock is never held across a network await.
pub struct IncidentStore<A> {
    api: A,
    state: Mutex<StoreState>,
}

impl<A: IncidentApi> IncidentStore<A> {
    /// Creates an empty store backed by the given transport.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(StoreState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("incident store mutex poisoned")
    }

    /// Fetches the full incident set and replaces the collection.
    ///
    /// Overlapping refreshes are tolerated: each refresh takes a sequence
    /// number at initiation, and a completed response is applied only if
    /// no later-initiated refresh exists. An older response can therefore
    /// never overwrite newer optimistic or authoritative state, even if
    /// the transport reorders responses.
    ///
    /// Transport/HTTP failure leaves the collection untouched and records
    /// an operator-facing error; a malformed payload empties the
    /// collection and records a warning instead — the next scheduled or
    /// manual refresh retries either case.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    pub async fn refresh(&self) {
        let seq = {
            let mut state = self.lock();
            state.refresh_seq += 1;
            state.loading = true;
            state.error = None;
            state.refresh_seq
        };

        let result = self.api.list().await;

        let mut state = self.lock();
        state.loading = false;

        if seq < state.refresh_seq {
            log::debug!("Discarding stale refresh result (seq {seq} < {})", state.refresh_seq);
            return;
        }

        match result {
            Ok(records) => {
                let incidents = dedupe_by_id(normalize_all(records));
                log::info!("Refreshed incident store: {} incidents", incidents.len());
                state.incidents = incidents;
                state.warning = None;
                state.applied_seq = seq;
            }
            Err(e) if e.is_malformed_payload() => {
                log::warn!("Incident list payload was malformed: {e}");
                state.incidents.clear();
                state.warning = Some(e.user_message());
                state.applied_seq = seq;
            }
            Err(e) => {
                log::error!("Failed to refresh incidents: {e}");
                state.error = Some(e.user_message());
            }
        }
    }

    /// Sets an incident's status: optimistic local rewrite first, then the
    /// network mutation, then an unconditional refresh to converge with
    /// authoritative state.
    ///
    /// The optimistic change is visible immediately, before the network
    /// call resolves. If the call fails, the change is left in place — the
    /// following refresh corrects it — and an error is recorded.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    pub async fn update_status(&self, id: &str, status: IncidentStatus) {
        {
            let mut state = self.lock();
            if let Some(incident) = state.incidents.iter_mut().find(|i| i.id == id) {
                incident.status = status;
            } else {
                log::warn!("Status update for unknown incident {id}");
            }
        }

        let mutation_error = match self.api.set_status(id, status).await {
            Ok(()) => None,
            Err(e) => {
                log::error!("Failed to update status of incident {id}: {e}");
                Some(e.user_message())
            }
        };

        self.refresh().await;

        // The convergence refresh clears refresh-originated errors at
        // initiation; the mutation failure still has to reach the operator.
        if let Some(message) = mutation_error {
            self.lock().error = Some(message);
        }
    }

    /// Deletes an incident and refreshes.
    ///
    /// No speculative local change is made for deletion — the incident
    /// disappears when the follow-up refresh no longer returns it.
    /// Operator confirmation happens at the presentation boundary, before
    /// this is called.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    pub async fn delete_incident(&self, id: &str) {
        if let Err(e) = self.api.delete(id).await {
            log::error!("Failed to delete incident {id}: {e}");
            self.lock().error = Some(e.user_message());
            return;
        }

        self.refresh().await;
    }

    /// Returns the incidents passing the filter, in store order.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    #[must_use]
    pub fn visible_incidents(&self, filter: StatusFilter) -> Vec<Incident> {
        filter_incidents(&self.lock().incidents, filter)
    }

    /// Looks up one incident by id, for the detail surface.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    #[must_use]
    pub fn incident(&self, id: &str) -> Option<Incident> {
        self.lock().incidents.iter().find(|i| i.id == id).cloned()
    }

    /// Returns the observable error/loading state.
    ///
    /// # Panics
    ///
    /// Panics if the store mutex is poisoned.
    #[must_use]
    pub fn observe(&self) -> StoreObservation {
        let state = self.lock();
        StoreObservation {
            loading: state.loading,
            error: state.error.clone(),
            warning: state.warning.clone(),
            total: state.incidents.len(),
        }
    }
}

/// Deduplicates a normalized payload by id, preserving payload order.
///
/// A later record with a duplicate id replaces the earlier one in place,
/// so the store never contains two entries with the same id.
fn dedupe_by_id(incidents: Vec<Incident>) -> Vec<Incident> {
    let mut out: Vec<Incident> = Vec::with_capacity(incidents.len());
    let mut index: HashMap<String, usize> = HashMap::new();
    for incident in incidents {
        match index.get(&incident.id) {
            Some(&at) => out[at] = incident,
            None => {
                index.insert(incident.id.clone(), out.len());
                out.push(incident);
            }
        }
    }
    out
}
