//! Field normalization: one raw record in, one canonical incident out.
//!
//! Never fails. Every field has a defined fallback (empty string, `None`,
//! or the default status) so downstream components can always assume a
//! fully-shaped value.

use chrono::{DateTime, NaiveDateTime, Utc};
use resq_map_incident_models::{Incident, IncidentStatus};

use crate::RawIncident;

/// Converts one raw record into exactly one canonical [`Incident`].
///
/// Priorities and statuses are case-folded; an invalid declared priority
/// becomes `None` so the classifier falls through to its heuristics.
/// Coordinate data is validated here — a malformed pair is dropped rather
/// than carried into the store.
#[must_use]
pub fn normalize(raw: RawIncident) -> Incident {
    Incident {
        id: raw.incident_id.as_ref().map(value_to_string).unwrap_or_default(),
        location: raw.incident_location.unwrap_or_default(),
        incident_type: raw.incident_type.unwrap_or_default(),
        declared_priority: raw
            .priority
            .as_deref()
            .and_then(|p| p.trim().parse().ok()),
        timestamp: raw.timestamp.as_deref().and_then(parse_timestamp),
        status: raw
            .status
            .as_deref()
            .map(IncidentStatus::from_raw)
            .unwrap_or_default(),
        description: raw.original_message.unwrap_or_default(),
        reporter_contact: raw.source.unwrap_or_default(),
        severity: raw.severity,
        coordinates: raw.coordinates.as_deref().and_then(parse_coordinate_pair),
        latitude: raw.latitude.as_ref().and_then(parse_scalar),
        longitude: raw.longitude.as_ref().and_then(parse_scalar),
    }
}

/// Normalizes a whole payload, preserving record order.
#[must_use]
pub fn normalize_all(records: Vec<RawIncident>) -> Vec<Incident> {
    records.into_iter().map(normalize).collect()
}

/// Parses a report timestamp leniently.
///
/// Accepts RFC 3339, and naive datetimes with or without fractional
/// seconds (treated as UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    None
}

/// Interprets a JSON value as a finite float, accepting numbers and
/// numeric strings.
fn parse_scalar(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

/// Validates an explicit coordinate array: exactly two finite numbers.
fn parse_coordinate_pair(values: &[serde_json::Value]) -> Option<[f64; 2]> {
    match values {
        [lat, lon] => Some([parse_scalar(lat)?, parse_scalar(lon)?]),
        _ => None,
    }
}

/// Renders a raw JSON id as its string form: strings unquoted, numbers as
/// printed. Anything else (`null`, booleans, containers) is treated the
/// same as an absent id.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
