//! Incident service HTTP client.
//!
//! The [`IncidentApi`] trait is the seam between the engine and the
//! network — the store depends on the trait, so tests substitute an
//! in-memory implementation.

use async_trait::async_trait;
use resq_map_incident_models::IncidentStatus;

use crate::{ApiConfig, ApiError, RawIncident, extract_records};

/// Operations the incident service exposes.
#[async_trait]
pub trait IncidentApi: Send + Sync {
    /// Fetches the full incident set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-success status, or a
    /// success body that is not interpretable as a record sequence.
    async fn list(&self) -> Result<Vec<RawIncident>, ApiError>;

    /// Sets the status of one incident.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    async fn set_status(&self, id: &str, status: IncidentStatus) -> Result<(), ApiError>;

    /// Deletes one incident.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or non-success status.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: IncidentApi + ?Sized> IncidentApi for std::sync::Arc<T> {
    async fn list(&self) -> Result<Vec<RawIncident>, ApiError> {
        (**self).list().await
    }

    async fn set_status(&self, id: &str, status: IncidentStatus) -> Result<(), ApiError> {
        (**self).set_status(id, status).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}

/// [`IncidentApi`] implementation over the upstream REST service.
pub struct HttpIncidentApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpIncidentApi {
    /// Creates a client for the given connection settings.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Creates a client configured from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-API-Key", &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Maps a non-success response status to [`ApiError::Http`].
    fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Http { status })
        }
    }
}

#[async_trait]
impl IncidentApi for HttpIncidentApi {
    async fn list(&self) -> Result<Vec<RawIncident>, ApiError> {
        let url = format!(
            "{}/incidents?user={}",
            self.config.base_url, self.config.user_id
        );
        log::debug!("Fetching incidents from {url}");

        let response = self.apply_headers(self.client.get(&url)).send().await?;
        Self::check_status(&response)?;

        // Decode failures on a success response mean the body wasn't the
        // JSON we expected, which is a payload problem rather than a
        // network one.
        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::MalformedPayload {
                    detail: format!("response body is not JSON: {e}"),
                }
            } else {
                ApiError::Network(e)
            }
        })?;

        extract_records(body)
    }

    async fn set_status(&self, id: &str, status: IncidentStatus) -> Result<(), ApiError> {
        let url = format!("{}/incidents/{id}/status", self.config.base_url);
        log::debug!("Setting incident {id} status to {status}");

        let response = self
            .apply_headers(self.client.put(&url))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        Self::check_status(&response)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/incidents/{id}", self.config.base_url);
        log::debug!("Deleting incident {id}");

        let response = self.apply_headers(self.client.delete(&url)).send().await?;
        Self::check_status(&response)
    }
}
