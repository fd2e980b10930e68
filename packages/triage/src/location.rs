//! Map position resolution.
//!
//! Authoritative data wins: an explicit coordinate pair, then scalar
//! lat/lon fields. Failing both, the free-text location is matched against
//! a fixed city lookup table, and finally a fixed regional centroid is
//! used so every incident can always be placed on the map.

use resq_map_incident_models::Incident;

/// Lower-cased city names mapped to their `[lat, lon]` coordinates.
///
/// Matched by substring against the incident's location text, in table
/// order — resolution is deterministic for a given ordering.
pub const CITY_COORDINATES: &[(&str, [f64; 2])] = &[
    ("bangalore", [12.9716, 77.5946]),
    ("delhi", [28.6139, 77.2090]),
    ("mumbai", [19.0760, 72.8777]),
    ("chennai", [13.0827, 80.2707]),
    ("kolkata", [22.5726, 88.3639]),
    ("hyderabad", [17.3850, 78.4867]),
    ("pune", [18.5204, 73.8567]),
    ("ahmedabad", [23.0225, 72.5714]),
];

/// Fallback coordinate when nothing else matches: the geographic centroid
/// of India.
pub const DEFAULT_CENTER: [f64; 2] = [20.5937, 78.9629];

/// Resolves an incident to exactly one `[lat, lon]` pair.
///
/// Fallback order:
///
/// 1. explicit `coordinates` pair;
/// 2. scalar `latitude`/`longitude` fields if both are present;
/// 3. substring match of the lower-cased location text against
///    [`CITY_COORDINATES`], first matching entry wins;
/// 4. [`DEFAULT_CENTER`].
#[must_use]
pub fn resolve_location(incident: &Incident) -> [f64; 2] {
    if let Some(pair) = incident.coordinates {
        return pair;
    }

    if let (Some(lat), Some(lon)) = (incident.latitude, incident.longitude) {
        return [lat, lon];
    }

    let location = incident.location.to_lowercase();
    for (city, coords) in CITY_COORDINATES {
        if location.contains(city) {
            return *coords;
        }
    }

    DEFAULT_CENTER
}
