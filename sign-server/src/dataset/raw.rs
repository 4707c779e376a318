//! Wire types for the published dataset documents.
//!
//! These mirror the JSON exactly and are converted into domain records by
//! `decode`. Nothing outside the dataset module sees them.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::DayType;

/// A value the publisher may write either as a string or as a number
/// (route and direction IDs).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextOrNumber {
    Text(String),
    Number(u64),
}

impl TextOrNumber {
    pub(crate) fn into_string(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Departures document in direct form: stop ID → records.
pub(crate) type DirectDocument = HashMap<String, Vec<RawDeparture>>;

/// One record in the direct form.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDeparture {
    pub route_id: TextOrNumber,
    pub direction_id: TextOrNumber,
    pub destination_name: String,
    /// Signed so that negative values reach range validation instead of
    /// failing as a type mismatch.
    pub departure_seconds: i64,
    #[serde(default)]
    pub trip_id: Option<String>,
    pub day_type: DayType,
}

/// Departures document in compacted columnar form.
#[derive(Debug, Deserialize)]
pub(crate) struct CompactDocument {
    /// Shared destination-name table.
    pub names: Vec<String>,
    pub stops: HashMap<String, Vec<CompactRow>>,
}

/// (route, direction, name index, departure seconds, day code, trip id).
///
/// The trailing trip ID may be missing or null.
#[derive(Debug, Deserialize)]
pub(crate) struct CompactRow(
    pub TextOrNumber,
    pub TextOrNumber,
    pub usize,
    pub i64,
    pub String,
    #[serde(default)] pub Option<String>,
);
