#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident API transport and field normalization.
//!
//! The upstream incident service returns loosely-shaped records — field
//! names vary, priorities and statuses arrive in any case, coordinates may
//! be a pair, two scalar fields, or absent entirely. This crate owns the
//! boundary: the [`client::IncidentApi`] trait and its HTTP implementation,
//! payload unwrapping, and the [`normalize`] step that converts every raw
//! record into exactly one canonical
//! [`Incident`](resq_map_incident_models::Incident).

pub mod client;
pub mod normalize;
pub mod payload;
pub mod raw;

pub use client::{HttpIncidentApi, IncidentApi};
pub use normalize::{normalize, normalize_all};
pub use payload::extract_records;
pub use raw::RawIncident;

/// Errors from incident API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: the service was unreachable or the
    /// connection broke mid-response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP error: {status}")]
    Http {
        /// The non-success status code.
        status: reqwest::StatusCode,
    },

    /// A success response whose body cannot be interpreted as a sequence of
    /// incident records.
    #[error("malformed payload: {detail}")]
    MalformedPayload {
        /// Description of the unexpected shape.
        detail: String,
    },
}

impl ApiError {
    /// Returns `true` for the non-fatal malformed-payload case, which the
    /// store treats as a warning rather than an error.
    #[must_use]
    pub const fn is_malformed_payload(&self) -> bool {
        matches!(self, Self::MalformedPayload { .. })
    }

    /// Maps this error to an operator-facing message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Network error: unable to reach the incident service. \
                 Check your connection or the service status."
                    .to_string()
            }
            Self::Http { status } => match status.as_u16() {
                404 => "Incident API endpoint not found. Verify the API URL.".to_string(),
                401 | 403 => "Authentication failed. Check your API key.".to_string(),
                _ => format!("Incident service error (HTTP {status})."),
            },
            Self::MalformedPayload { .. } => {
                "Incident service returned an unexpected response format.".to_string()
            }
        }
    }
}

/// Connection settings for the incident service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the incident API (e.g., `"https://host/api/v1"`).
    pub base_url: String,
    /// Value sent in the `X-API-Key` header.
    pub api_key: String,
    /// Operator/user identifier appended to list requests.
    pub user_id: String,
}

impl ApiConfig {
    /// Builds a config from the `RESQ_API_URL`, `RESQ_API_KEY`, and
    /// `RESQ_USER_ID` environment variables, with local defaults for
    /// anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("RESQ_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string()),
            api_key: std::env::var("RESQ_API_KEY").unwrap_or_default(),
            user_id: std::env::var("RESQ_USER_ID").unwrap_or_default(),
        }
    }
}
