#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical incident types shared across the `ResQ` map system.
//!
//! Every upstream record is normalized into the [`Incident`] shape defined
//! here before it reaches the store or any view. Priority tier and map
//! position are intentionally *not* stored on the record — they are derived
//! on demand so that a corrected `declared_priority` or coordinate pair is
//! reflected immediately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Urgency tier for an incident.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    /// Life-threatening or large-scale events (fire, flood, earthquake).
    High,
    /// Urgent but contained events (accidents, medical, theft).
    Medium,
    /// Everything else.
    Low,
}

impl Priority {
    /// Returns the marker color (CSS hex) for this tier.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "#ef4444",
            Self::Medium => "#eab308",
            Self::Low => "#22c55e",
        }
    }

    /// Returns the human-readable label for this tier.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::High, Self::Medium, Self::Low]
    }
}

/// Lifecycle status of an incident.
///
/// Unrecognized or missing source values normalize to [`Self::Active`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IncidentStatus {
    /// Reported and awaiting dispatch.
    #[default]
    Active,
    /// A response team has been dispatched.
    Dispatched,
    /// The incident has been resolved.
    Resolved,
}

impl IncidentStatus {
    /// Parses a raw status string case-insensitively, falling back to
    /// [`Self::Active`] for anything unrecognized.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

/// Single-valued status filter for the list and marker views.
///
/// Selecting a new filter replaces the prior selection.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatusFilter {
    /// Show every incident regardless of status.
    #[default]
    All,
    /// Only `active` incidents.
    Active,
    /// Only `dispatched` incidents.
    Dispatched,
    /// Only `resolved` incidents.
    Resolved,
}

impl StatusFilter {
    /// Returns `true` if an incident with the given status passes this
    /// filter.
    #[must_use]
    pub const fn matches(self, status: IncidentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => matches!(status, IncidentStatus::Active),
            Self::Dispatched => matches!(status, IncidentStatus::Dispatched),
            Self::Resolved => matches!(status, IncidentStatus::Resolved),
        }
    }

    /// Returns all variants of this enum, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::All, Self::Active, Self::Dispatched, Self::Resolved]
    }
}

/// A reported emergency incident, normalized to the canonical schema.
///
/// This is the only form retained by the store. `id` is unique within the
/// store — a later record with a duplicate `id` replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Opaque stable identifier from the source. Never reassigned.
    pub id: String,
    /// Human-readable place description. May be empty.
    pub location: String,
    /// Free-text category label (e.g., "Building Fire"). Used for display
    /// and for priority heuristics.
    pub incident_type: String,
    /// Explicit priority tier, if the source declared one.
    pub declared_priority: Option<Priority>,
    /// When the incident was reported. Used for recency display only.
    pub timestamp: Option<DateTime<Utc>>,
    /// Current lifecycle status.
    pub status: IncidentStatus,
    /// Free-text description. May be empty.
    pub description: String,
    /// Reporter contact details. May be empty.
    pub reporter_contact: String,
    /// Free-text severity qualifier ("critical", "moderate", ...). Only a
    /// classification fallback signal, not a primary display field.
    pub severity: Option<String>,
    /// Explicit `[lat, lon]` pair, when the source supplied one.
    pub coordinates: Option<[f64; 2]>,
    /// Scalar latitude, when the source supplied lat/lon as separate fields.
    pub latitude: Option<f64>,
    /// Scalar longitude, when the source supplied lat/lon as separate fields.
    pub longitude: Option<f64>,
}

impl Incident {
    /// Formats the incident's age relative to `now` for the list view.
    ///
    /// Returns `"Unknown time"` when the source timestamp was missing or
    /// unparseable.
    #[must_use]
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        let Some(reported) = self.timestamp else {
            return "Unknown time".to_string();
        };
        let minutes = (now - reported).num_minutes();
        if minutes < 1 {
            "Just now".to_string()
        } else if minutes < 60 {
            format!("{minutes} min ago")
        } else if minutes < 1440 {
            format!("{} hr ago", minutes / 60)
        } else {
            reported.format("%Y-%m-%d").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn incident_at(timestamp: Option<DateTime<Utc>>) -> Incident {
        Incident {
            id: "i1".to_string(),
            location: String::new(),
            incident_type: String::new(),
            declared_priority: None,
            timestamp,
            status: IncidentStatus::Active,
            description: String::new(),
            reporter_contact: String::new(),
            severity: None,
            coordinates: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn status_from_raw_is_case_insensitive() {
        assert_eq!(IncidentStatus::from_raw("ACTIVE"), IncidentStatus::Active);
        assert_eq!(
            IncidentStatus::from_raw("Dispatched"),
            IncidentStatus::Dispatched
        );
        assert_eq!(
            IncidentStatus::from_raw(" resolved "),
            IncidentStatus::Resolved
        );
    }

    #[test]
    fn unrecognized_status_defaults_to_active() {
        assert_eq!(IncidentStatus::from_raw("pending"), IncidentStatus::Active);
        assert_eq!(IncidentStatus::from_raw(""), IncidentStatus::Active);
    }

    #[test]
    fn priority_parses_any_case() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn filter_matches() {
        assert!(StatusFilter::All.matches(IncidentStatus::Resolved));
        assert!(StatusFilter::Active.matches(IncidentStatus::Active));
        assert!(!StatusFilter::Active.matches(IncidentStatus::Dispatched));
        assert!(StatusFilter::Resolved.matches(IncidentStatus::Resolved));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&IncidentStatus::Dispatched).unwrap();
        assert_eq!(json, "\"dispatched\"");
    }

    #[test]
    fn relative_age_boundaries() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let just_now = incident_at(Some(now - chrono::Duration::seconds(30)));
        assert_eq!(just_now.relative_age(now), "Just now");

        let minutes = incident_at(Some(now - chrono::Duration::minutes(5)));
        assert_eq!(minutes.relative_age(now), "5 min ago");

        let hours = incident_at(Some(now - chrono::Duration::hours(3)));
        assert_eq!(hours.relative_age(now), "3 hr ago");

        let days = incident_at(Some(now - chrono::Duration::days(2)));
        assert_eq!(days.relative_age(now), "2024-05-30");

        let unknown = incident_at(None);
        assert_eq!(unknown.relative_age(now), "Unknown time");
    }
}
