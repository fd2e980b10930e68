//! Pure derivation of the visible set from the collection and the active
//! filter selection.

use resq_map_incident_models::{Incident, StatusFilter};

/// Returns the ordered sub-sequence of incidents passing the filter.
///
/// Preserves the store's iteration order (insertion/refresh order) — no
/// re-sorting. [`StatusFilter::All`] returns the full sequence.
#[must_use]
pub fn filter_incidents(incidents: &[Incident], filter: StatusFilter) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|incident| filter.matches(incident.status))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use resq_map_incident_models::IncidentStatus;

    use super::*;

    fn incident(id: &str, status: IncidentStatus) -> Incident {
        Incident {
            id: id.to_string(),
            location: String::new(),
            incident_type: String::new(),
            declared_priority: None,
            timestamp: None,
            status,
            description: String::new(),
            reporter_contact: String::new(),
            severity: None,
            coordinates: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn all_returns_everything_in_order() {
        let incidents = vec![
            incident("a", IncidentStatus::Resolved),
            incident("b", IncidentStatus::Active),
            incident("c", IncidentStatus::Dispatched),
        ];
        let visible = filter_incidents(&incidents, StatusFilter::All);
        assert_eq!(
            visible.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn status_filter_preserves_relative_order() {
        let incidents = vec![
            incident("a", IncidentStatus::Resolved),
            incident("b", IncidentStatus::Active),
            incident("c", IncidentStatus::Resolved),
        ];
        let visible = filter_incidents(&incidents, StatusFilter::Resolved);
        assert_eq!(
            visible.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            ["a", "c"]
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(filter_incidents(&[], StatusFilter::Active).is_empty());
    }
}
