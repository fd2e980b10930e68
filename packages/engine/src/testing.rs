//! In-memory [`IncidentApi`] double for store and engine tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use resq_map_incident_models::IncidentStatus;
use resq_map_source::{ApiError, IncidentApi, RawIncident};
use tokio::sync::Notify;

/// Builds a minimal raw record with the given id and status.
pub fn record(id: &str, status: &str) -> RawIncident {
    RawIncident {
        incident_id: Some(serde_json::Value::from(id)),
        incident_type: Some("test".to_string()),
        status: Some(status.to_string()),
        ..RawIncident::default()
    }
}

/// Builds a payload of `(id, status)` records.
pub fn payload(entries: &[(&str, &str)]) -> Vec<RawIncident> {
    entries.iter().map(|(id, status)| record(id, status)).collect()
}

#[derive(Default)]
struct MockState {
    list_responses: VecDeque<Result<Vec<RawIncident>, ApiError>>,
    list_gates: VecDeque<Arc<Notify>>,
    set_status_responses: VecDeque<Result<(), ApiError>>,
    set_status_gates: VecDeque<Arc<Notify>>,
    delete_responses: VecDeque<Result<(), ApiError>>,
    list_calls: usize,
    set_status_calls: Vec<(String, IncidentStatus)>,
    delete_calls: Vec<String>,
}

/// Scripted transport: queued responses are returned in call order, and a
/// call can be gated on a [`Notify`] to simulate a slow or reordered
/// network. Exhausted queues answer with an empty list / `Ok(())`.
#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock api mutex poisoned")
    }

    pub fn push_list(&self, response: Result<Vec<RawIncident>, ApiError>) {
        self.lock().list_responses.push_back(response);
    }

    pub fn push_set_status(&self, response: Result<(), ApiError>) {
        self.lock().set_status_responses.push_back(response);
    }

    pub fn push_delete(&self, response: Result<(), ApiError>) {
        self.lock().delete_responses.push_back(response);
    }

    /// Makes the next `list` call wait until the returned handle is
    /// notified before responding.
    pub fn gate_next_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().list_gates.push_back(Arc::clone(&gate));
        gate
    }

    /// Makes the next `set_status` call wait until the returned handle is
    /// notified before responding.
    pub fn gate_next_set_status(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().set_status_gates.push_back(Arc::clone(&gate));
        gate
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    pub fn set_status_calls(&self) -> Vec<(String, IncidentStatus)> {
        self.lock().set_status_calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.lock().delete_calls.clone()
    }
}

#[async_trait]
impl IncidentApi for MockApi {
    async fn list(&self) -> Result<Vec<RawIncident>, ApiError> {
        let (gate, response) = {
            let mut state = self.lock();
            state.list_calls += 1;
            (
                state.list_gates.pop_front(),
                state.list_responses.pop_front(),
            )
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        response.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn set_status(&self, id: &str, status: IncidentStatus) -> Result<(), ApiError> {
        let (gate, response) = {
            let mut state = self.lock();
            state.set_status_calls.push((id.to_string(), status));
            (
                state.set_status_gates.pop_front(),
                state.set_status_responses.pop_front(),
            )
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        response.unwrap_or(Ok(()))
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = {
            let mut state = self.lock();
            state.delete_calls.push(id.to_string());
            state.delete_responses.pop_front()
        };
        response.unwrap_or(Ok(()))
    }
}
