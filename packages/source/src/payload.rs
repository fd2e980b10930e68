//! List-response payload interpretation.
//!
//! The incident service has been observed returning its record sequence
//! either as a bare JSON array or nested under a conventional wrapper key.
//! Anything else is a malformed payload — detected here, before
//! normalization ever runs.

use crate::{ApiError, RawIncident};

/// Wrapper keys under which the record array may be nested.
const WRAPPER_KEYS: &[&str] = &["incidents", "data"];

/// Interprets a list-response body as a sequence of raw incident records.
///
/// Accepts a bare array, or an object with the array under `"incidents"`
/// or `"data"`. Individual records that fail to deserialize are replaced
/// with an empty record (and logged) rather than failing the whole
/// payload — normalization downstream is total.
///
/// # Errors
///
/// Returns [`ApiError::MalformedPayload`] if the body is not interpretable
/// as a record sequence at all.
pub fn extract_records(body: serde_json::Value) -> Result<Vec<RawIncident>, ApiError> {
    let records = match body {
        serde_json::Value::Array(records) => records,
        serde_json::Value::Object(mut map) => {
            let nested = WRAPPER_KEYS.iter().find_map(|key| {
                map.remove(*key).and_then(|value| match value {
                    serde_json::Value::Array(records) => Some(records),
                    _ => None,
                })
            });
            match nested {
                Some(records) => records,
                None => {
                    return Err(ApiError::MalformedPayload {
                        detail: format!(
                            "object without an {WRAPPER_KEYS:?} array, keys: [{}]",
                            map.keys().cloned().collect::<Vec<_>>().join(", ")
                        ),
                    });
                }
            }
        }
        other => {
            return Err(ApiError::MalformedPayload {
                detail: format!("expected array or wrapper object, got {other}"),
            });
        }
    };

    Ok(records
        .into_iter()
        .map(|record| {
            serde_json::from_value(record.clone()).unwrap_or_else(|e| {
                log::warn!("Skipping unreadable incident record fields: {e} ({record})");
                RawIncident::default()
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_bare_array() {
        let records = extract_records(json!([{"incident_id": "a"}, {"incident_id": "b"}])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].incident_id, Some(json!("a")));
    }

    #[test]
    fn unwraps_incidents_key() {
        let records =
            extract_records(json!({"incidents": [{"incident_id": "a"}], "count": 1})).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn unwraps_data_key() {
        let records = extract_records(json!({"data": [{"incident_id": "a"}]})).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn rejects_object_without_record_array() {
        let err = extract_records(json!({"error": "boom"})).unwrap_err();
        assert!(err.is_malformed_payload());
    }

    #[test]
    fn rejects_scalar_body() {
        let err = extract_records(json!("oops")).unwrap_err();
        assert!(err.is_malformed_payload());
    }

    #[test]
    fn accepts_empty_array() {
        let records = extract_records(json!([])).unwrap();
        assert!(records.is_empty());
    }
}
