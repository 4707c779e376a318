//! Historical departure records.

use serde::Serialize;

use super::DayType;

/// Seconds in one service day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// One historical departure from a stop.
///
/// Records are immutable once the dataset is loaded. `departure_seconds` is
/// always within `0..SECONDS_PER_DAY`; the dataset loader rejects anything
/// else. `direction_id` keeps the string form used by the published data
/// (normally `"0"` or `"1"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureRecord {
    pub route_id: String,
    pub direction_id: String,
    pub destination_name: String,
    /// Seconds after local midnight.
    pub departure_seconds: u32,
    /// Trip identifier; empty when the source omitted it.
    pub trip_id: String,
    pub day_type: DayType,
}

impl DepartureRecord {
    /// Whether this record belongs to the given direction.
    ///
    /// Directions are compared by their decimal string form, matching the
    /// way the data encodes them.
    pub fn matches_direction(&self, direction: u32) -> bool {
        self.direction_id == direction.to_string()
    }
}
