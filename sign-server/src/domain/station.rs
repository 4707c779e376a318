//! Station topology types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Geographic position of a station.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Human-readable labels for the two travel directions at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionLabels {
    pub north: String,
    pub south: String,
}

impl Default for DirectionLabels {
    fn default() -> Self {
        Self {
            north: "Northbound".to_string(),
            south: "Southbound".to_string(),
        }
    }
}

impl DirectionLabels {
    /// Label for a numeric direction: 0 is north, anything else south.
    pub fn for_direction(&self, direction: u32) -> &str {
        if direction == 0 {
            &self.north
        } else {
            &self.south
        }
    }
}

/// A named stop served by one or more routes.
///
/// A station listing `child_stop_ids` is a complex: its children are
/// platform-level stops whose departures are merged into the parent's
/// predictions. Children never appear in the public station listing.
///
/// # Examples
///
/// ```
/// use sign_server::domain::Station;
///
/// let json = r#"{
///     "stop_id": "635",
///     "name": "14 St - Union Sq",
///     "served_routes": ["4", "5", "6"],
///     "child_stop_ids": ["L03"]
/// }"#;
/// let station: Station = serde_json::from_str(json).unwrap();
/// assert_eq!(station.display_name, "14 St - Union Sq");
/// assert!(station.is_complex());
/// assert_eq!(station.direction_labels.north, "Northbound");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub stop_id: String,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub direction_labels: DirectionLabels,
    #[serde(default)]
    pub served_routes: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_stop_ids: Vec<String>,
}

impl Station {
    /// Whether this station groups child stops.
    pub fn is_complex(&self) -> bool {
        !self.child_stop_ids.is_empty()
    }

    /// Whether the given route calls here.
    pub fn serves(&self, route_id: &str) -> bool {
        self.served_routes.contains(route_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Station {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_station_gets_defaults() {
        let station = parse(r#"{"stop_id": "101", "display_name": "Van Cortlandt Park"}"#);
        assert_eq!(station.stop_id, "101");
        assert_eq!(station.coordinates, Coordinates::default());
        assert_eq!(station.direction_labels, DirectionLabels::default());
        assert!(station.served_routes.is_empty());
        assert!(!station.is_complex());
    }

    #[test]
    fn full_station() {
        let station = parse(
            r#"{
                "stop_id": "635",
                "display_name": "14 St - Union Sq",
                "coordinates": {"lat": 40.734673, "lon": -73.989951},
                "direction_labels": {"north": "Uptown", "south": "Downtown"},
                "served_routes": ["6", "4", "5"],
                "child_stop_ids": ["L03", "R20"]
            }"#,
        );
        assert_eq!(station.direction_labels.for_direction(0), "Uptown");
        assert_eq!(station.direction_labels.for_direction(1), "Downtown");
        assert!(station.serves("5"));
        assert!(!station.serves("7"));
        assert_eq!(station.child_stop_ids, vec!["L03", "R20"]);
    }

    #[test]
    fn leaf_station_serializes_without_children() {
        let station = parse(r#"{"stop_id": "101", "name": "Van Cortlandt Park"}"#);
        let json = serde_json::to_string(&station).unwrap();
        assert!(!json.contains("child_stop_ids"));
        assert!(json.contains("\"display_name\":\"Van Cortlandt Park\""));
    }
}
