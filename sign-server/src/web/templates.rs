//! Askama templates for the web frontend.

use askama::Template;

use crate::display::Frame;
use crate::domain::{Prediction, Station};

use super::dto::NO_TRAINS_MESSAGE;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Station picker.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<StationView>,
}

/// The simulated arrival sign.
#[derive(Template)]
#[template(path = "sign.html")]
pub struct SignTemplate {
    pub station_name: String,
    pub direction_label: String,
    pub display_id: String,
    /// Seconds between page refreshes.
    pub refresh_secs: u32,
    pub rows: Vec<SignRow>,
    /// Shown instead of rows when there are none.
    pub message: Option<String>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Station view model for the picker.
#[derive(Debug, Clone)]
pub struct StationView {
    pub stop_id: String,
    pub name: String,
    pub routes: String,
    pub north_label: String,
    pub south_label: String,
    /// Sign page for direction 0.
    pub north_href: String,
    /// Sign page for direction 1.
    pub south_href: String,
}

impl StationView {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            stop_id: station.stop_id.clone(),
            name: station.display_name.clone(),
            routes: station
                .served_routes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            north_label: station.direction_labels.north.clone(),
            south_label: station.direction_labels.south.clone(),
            north_href: sign_href(&station.stop_id, Some(0), None),
            south_href: sign_href(&station.stop_id, Some(1), None),
        }
    }
}

/// One row of the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRow {
    /// Row number printed at the left ("1." for the next train).
    pub position: String,
    pub route_id: String,
    pub destination: String,
    pub minutes: String,
    pub is_express: bool,
}

impl SignRow {
    /// Create from a domain Prediction.
    pub fn from_prediction(prediction: &Prediction) -> Self {
        Self {
            position: format!("{}.", prediction.rank + 1),
            route_id: prediction.route_id.clone(),
            destination: prediction.destination_name.clone(),
            minutes: format!("{} min", prediction.minutes()),
            is_express: prediction.is_express,
        }
    }
}

impl SignTemplate {
    /// Build the page for one refreshed frame.
    pub fn from_frame(
        station_name: String,
        direction_label: String,
        display_id: String,
        refresh_secs: u32,
        frame: &Frame,
    ) -> Self {
        let rows: Vec<SignRow> = frame
            .primary
            .iter()
            .chain(frame.secondary.iter())
            .map(SignRow::from_prediction)
            .collect();
        let message = rows.is_empty().then(|| NO_TRAINS_MESSAGE.to_string());

        Self {
            station_name,
            direction_label,
            display_id,
            refresh_secs,
            rows,
            message,
        }
    }
}

/// Link to the sign page. Query values are percent-encoded.
pub fn sign_href(stop_id: &str, direction: Option<u32>, display: Option<&str>) -> String {
    let mut href = format!("/sign?stop={}", query_escape(stop_id));
    if let Some(direction) = direction {
        href.push_str(&format!("&direction={direction}"));
    }
    if let Some(display) = display {
        href.push_str(&format!("&display={}", query_escape(display)));
    }
    href
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn query_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
