//! View synchronization: reconciling the marker layer and list against
//! the visible set, and routing selection.
//!
//! Reconciliation is a diff between two immutable snapshots keyed by id,
//! not incremental mutation of a live rendering — the whole marker set is
//! rebuilt on every change to the visible set. Priority and coordinate are
//! computed at build time from the classifier and resolver, never cached.

use resq_map_incident_models::{Incident, Priority};
use resq_map_triage::{classify, resolve_location};

/// A renderable map marker derived from one visible incident.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Incident id this marker represents.
    pub id: String,
    /// Resolved `[lat, lon]` position.
    pub coordinate: [f64; 2],
    /// Classified priority tier; drives the marker's visual class.
    pub priority: Priority,
    /// Single-character glyph: first character of the incident type,
    /// upper-cased, `'U'` when the type is empty.
    pub label: char,
}

/// Ids added and removed between two marker snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    /// Ids present in the next snapshot but not the previous one.
    pub added: Vec<String>,
    /// Ids present in the previous snapshot but not the next one.
    pub removed: Vec<String>,
}

/// Builds the full marker set for a visible snapshot, in snapshot order.
#[must_use]
pub fn build_markers(visible: &[Incident]) -> Vec<Marker> {
    visible
        .iter()
        .map(|incident| Marker {
            id: incident.id.clone(),
            coordinate: resolve_location(incident),
            priority: classify(incident),
            label: incident
                .incident_type
                .chars()
                .next()
                .and_then(|c| c.to_uppercase().next())
                .unwrap_or('U'),
        })
        .collect()
}

/// Diffs two marker snapshots by id.
#[must_use]
pub fn diff_markers(prev: &[Marker], next: &[Marker]) -> MarkerDiff {
    let added = next
        .iter()
        .filter(|marker| !prev.iter().any(|p| p.id == marker.id))
        .map(|marker| marker.id.clone())
        .collect();
    let removed = prev
        .iter()
        .filter(|marker| !next.iter().any(|n| n.id == marker.id))
        .map(|marker| marker.id.clone())
        .collect();
    MarkerDiff { added, removed }
}

/// Tracks the rendered snapshot (markers + list) and the selected incident.
///
/// Selecting never mutates the store; a selection survives refreshes for
/// as long as its incident remains in the applied snapshot and clears when
/// it disappears.
#[derive(Debug, Default)]
pub struct ViewState {
    visible: Vec<Incident>,
    markers: Vec<Marker>,
    selected: Option<String>,
}

impl ViewState {
    /// Creates an empty view with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a new visible snapshot, rebuilding the marker set, and
    /// returns which marker ids were added/removed relative to the
    /// previous snapshot.
    pub fn apply(&mut self, visible: Vec<Incident>) -> MarkerDiff {
        let next = build_markers(&visible);
        let diff = diff_markers(&self.markers, &next);
        self.markers = next;
        self.visible = visible;

        if let Some(selected) = &self.selected {
            if !self.visible.iter().any(|i| &i.id == selected) {
                self.selected = None;
            }
        }

        diff
    }

    /// Records a selection from a marker or list click.
    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    /// Clears the current selection (detail surface closed).
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Resolves the selection against the current snapshot.
    #[must_use]
    pub fn selected_incident(&self) -> Option<&Incident> {
        let selected = self.selected.as_deref()?;
        self.visible.iter().find(|i| i.id == selected)
    }

    /// The current marker set, in snapshot order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The current list entries, in snapshot order.
    #[must_use]
    pub fn list(&self) -> &[Incident] {
        &self.visible
    }
}
