//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::display::Frame;
use crate::domain::{Prediction, Station};

/// Message shown when a stop has nothing coming within the horizon.
pub const NO_TRAINS_MESSAGE: &str = "No upcoming trains";

/// Request to search stations by name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Name fragment or stop ID
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Query selecting a stop and optional direction.
#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    /// Stop ID
    pub stop: String,

    /// Direction ID; absent or empty means both directions
    pub direction: Option<String>,
}

/// Query for the HTML sign page.
#[derive(Debug, Deserialize)]
pub struct SignQuery {
    /// Stop ID
    pub stop: String,

    /// Direction ID; absent or empty means both directions
    pub direction: Option<String>,

    /// Display ID owning the rotation memory (defaults to "default")
    pub display: Option<String>,
}

/// A station in listings and search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Stop ID
    pub stop_id: String,

    /// Station name
    pub name: String,

    /// Routes serving the station
    pub routes: Vec<String>,

    /// Label for direction 0
    pub north_label: String,

    /// Label for direction 1
    pub south_label: String,

    /// Whether the station groups child stops
    pub is_complex: bool,
}

/// Response listing stations.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

/// A predicted arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    /// Route ID (e.g., "6")
    pub route_id: String,

    /// Direction ID as published
    pub direction_id: String,

    /// Destination text
    pub destination: String,

    /// Rounded minutes until departure
    pub minutes: u32,

    /// Exact seconds until departure
    pub wait_seconds: u32,

    /// Position in the list (0 = next train)
    pub rank: usize,

    /// Whether this is an express run
    pub is_express: bool,

    /// Trip ID (may be empty)
    pub trip_id: String,
}

/// Response for a stop's predictions.
#[derive(Debug, Serialize)]
pub struct PredictionsResponse {
    /// Requested stop ID
    pub stop_id: String,

    /// Station name, if the stop is known
    pub station_name: Option<String>,

    /// Upcoming trains, nearest first
    pub predictions: Vec<PredictionResult>,
}

/// Response for one display refresh.
#[derive(Debug, Serialize)]
pub struct FrameResponse {
    /// Display whose rotation advanced
    pub display_id: String,

    /// Requested stop ID
    pub stop_id: String,

    /// Next train
    pub primary: Option<PredictionResult>,

    /// Rotating second row
    pub secondary: Option<PredictionResult>,

    /// Number of predictions available this cycle
    pub total: usize,

    /// Set when there is nothing to show
    pub message: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            stop_id: station.stop_id.clone(),
            name: station.display_name.clone(),
            routes: station.served_routes.iter().cloned().collect(),
            north_label: station.direction_labels.north.clone(),
            south_label: station.direction_labels.south.clone(),
            is_complex: station.is_complex(),
        }
    }
}

impl PredictionResult {
    /// Create from a domain Prediction.
    pub fn from_prediction(prediction: &Prediction) -> Self {
        Self {
            route_id: prediction.route_id.clone(),
            direction_id: prediction.direction_id.clone(),
            destination: prediction.destination_name.clone(),
            minutes: prediction.minutes(),
            wait_seconds: prediction.wait_seconds,
            rank: prediction.rank,
            is_express: prediction.is_express,
            trip_id: prediction.trip_id.clone(),
        }
    }
}

impl FrameResponse {
    /// Create from a display frame.
    pub fn from_frame(display_id: String, stop_id: String, frame: &Frame) -> Self {
        Self {
            display_id,
            stop_id,
            primary: frame.primary.as_ref().map(PredictionResult::from_prediction),
            secondary: frame
                .secondary
                .as_ref()
                .map(PredictionResult::from_prediction),
            total: frame.total,
            message: frame.is_empty().then(|| NO_TRAINS_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(rank: usize, wait_seconds: u32) -> Prediction {
        Prediction {
            route_id: "6".into(),
            direction_id: "0".into(),
            destination_name: "Pelham Bay Park".into(),
            wait_seconds,
            rank,
            trip_id: "t1_X".into(),
            is_express: true,
        }
    }

    #[test]
    fn prediction_result_rounds_minutes() {
        let result = PredictionResult::from_prediction(&prediction(0, 150));
        assert_eq!(result.minutes, 3);
        assert_eq!(result.wait_seconds, 150);
        assert_eq!(result.destination, "Pelham Bay Park");
        assert!(result.is_express);
    }

    #[test]
    fn empty_frame_carries_message() {
        let frame = Frame {
            primary: None,
            secondary: None,
            total: 0,
        };
        let response = FrameResponse::from_frame("lobby".into(), "635".into(), &frame);
        assert_eq!(response.message.as_deref(), Some(NO_TRAINS_MESSAGE));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["primary"], serde_json::Value::Null);
        assert_eq!(json["display_id"], "lobby");
    }

    #[test]
    fn full_frame_has_no_message() {
        let frame = Frame {
            primary: Some(prediction(0, 60)),
            secondary: Some(prediction(1, 300)),
            total: 2,
        };
        let response = FrameResponse::from_frame("lobby".into(), "635".into(), &frame);
        assert_eq!(response.message, None);
        assert_eq!(response.primary.unwrap().minutes, 1);
        assert_eq!(response.secondary.unwrap().rank, 1);
    }

    #[test]
    fn station_result_fields() {
        let station: Station = serde_json::from_str(
            r#"{"stop_id": "635", "name": "14 St - Union Sq",
                "served_routes": ["6", "4"], "child_stop_ids": ["L03"]}"#,
        )
        .unwrap();
        let result = StationResult::from_station(&station);
        assert_eq!(result.routes, vec!["4", "6"]);
        assert!(result.is_complex);
        assert_eq!(result.north_label, "Northbound");
    }
}
