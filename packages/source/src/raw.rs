//! The loosely-shaped wire record as received from the incident service.

use serde::Deserialize;

/// An incident record exactly as the upstream service sends it.
///
/// Field presence and naming are not guaranteed: every field is optional,
/// and the common alternate names observed from the service are accepted
/// as aliases. Fields that arrive as either numbers or numeric strings
/// (`id`, `latitude`, `longitude`, `coordinates` elements) are kept as raw
/// JSON values and interpreted during normalization. Not retained past
/// [`normalize`](crate::normalize::normalize).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIncident {
    /// Stable identifier. Usually a string, occasionally a number.
    #[serde(default, alias = "id")]
    pub incident_id: Option<serde_json::Value>,
    /// Free-text place description.
    #[serde(default, alias = "location")]
    pub incident_location: Option<String>,
    /// Free-text category label.
    #[serde(default, alias = "type")]
    pub incident_type: Option<String>,
    /// Declared priority tier, any case.
    #[serde(default)]
    pub priority: Option<String>,
    /// Report time as an ISO 8601-ish string.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Lifecycle status, any case.
    #[serde(default)]
    pub status: Option<String>,
    /// Free-text description of what was reported.
    #[serde(default, alias = "description")]
    pub original_message: Option<String>,
    /// Reporter contact / reporting channel.
    #[serde(default, alias = "reporter_contact")]
    pub source: Option<String>,
    /// Free-text severity qualifier ("critical", "moderate", ...).
    #[serde(default)]
    pub severity: Option<String>,
    /// Explicit `[lat, lon]` pair.
    #[serde(default)]
    pub coordinates: Option<Vec<serde_json::Value>>,
    /// Scalar latitude, number or numeric string.
    #[serde(default)]
    pub latitude: Option<serde_json::Value>,
    /// Scalar longitude, number or numeric string.
    #[serde(default)]
    pub longitude: Option<serde_json::Value>,
}
