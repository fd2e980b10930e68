//! Priority tier classification.
//!
//! Explicit data wins: a valid declared priority is returned verbatim.
//! Otherwise the incident type is matched case-insensitively against fixed
//! keyword tables, with the free-text severity qualifier as a secondary
//! signal. The keyword sets are fixed configuration, not learned or remote.

use resq_map_incident_models::{Incident, Priority};

/// Incident type keywords that classify as [`Priority::High`].
pub const HIGH_PRIORITY_TYPES: &[&str] = &["fire", "explosion", "flood", "earthquake"];

/// Incident type keywords that classify as [`Priority::Medium`].
pub const MEDIUM_PRIORITY_TYPES: &[&str] = &["accident", "medical", "theft"];

/// Classifies an incident into exactly one priority tier.
///
/// Rules are evaluated in strict order, first match wins:
///
/// 1. a valid `declared_priority` is returned verbatim;
/// 2. type matches [`HIGH_PRIORITY_TYPES`] or severity is `"critical"` →
///    [`Priority::High`];
/// 3. type matches [`MEDIUM_PRIORITY_TYPES`] or severity is `"moderate"` →
///    [`Priority::Medium`];
/// 4. otherwise [`Priority::Low`].
#[must_use]
pub fn classify(incident: &Incident) -> Priority {
    if let Some(declared) = incident.declared_priority {
        return declared;
    }

    let kind = incident.incident_type.to_lowercase();
    let severity = incident
        .severity
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    if contains_any(&kind, HIGH_PRIORITY_TYPES) || severity == "critical" {
        return Priority::High;
    }
    if contains_any(&kind, MEDIUM_PRIORITY_TYPES) || severity == "moderate" {
        return Priority::Medium;
    }

    Priority::Low
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
