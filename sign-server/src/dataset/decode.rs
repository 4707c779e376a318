//! Decoding of the published documents into domain records.
//!
//! The departures document comes in two shapes. The compacted form stores
//! each record as a positional tuple and hoists destination names into a
//! shared table; it is detected by having both a `names` and a `stops` key
//! at the top level. Everything else is treated as the direct form.

use std::collections::HashMap;

use serde_json::Value;

use super::error::LoadError;
use super::raw::{CompactDocument, DirectDocument};
use crate::domain::{DayType, DepartureRecord, SECONDS_PER_DAY, Station};

/// Departure records grouped by stop ID, in document order per stop.
pub(crate) type DepartureTable = HashMap<String, Vec<DepartureRecord>>;

/// Parse the station topology document.
pub(crate) fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>, LoadError> {
    serde_json::from_slice(bytes).map_err(LoadError::stations_json)
}

/// Parse the departures document in either form.
pub(crate) fn parse_departures(bytes: &[u8]) -> Result<DepartureTable, LoadError> {
    let value: Value = serde_json::from_slice(bytes).map_err(LoadError::departures_json)?;

    if is_compact(&value) {
        let doc: CompactDocument =
            serde_json::from_value(value).map_err(LoadError::departures_json)?;
        expand_compact(doc)
    } else {
        let doc: DirectDocument =
            serde_json::from_value(value).map_err(LoadError::departures_json)?;
        expand_direct(doc)
    }
}

fn is_compact(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("names") && obj.contains_key("stops"))
}

fn checked_seconds(stop_id: &str, seconds: i64) -> Result<u32, LoadError> {
    u32::try_from(seconds)
        .ok()
        .filter(|s| *s < SECONDS_PER_DAY)
        .ok_or_else(|| LoadError::DepartureOutOfRange {
            stop_id: stop_id.to_string(),
            seconds,
        })
}

fn expand_direct(doc: DirectDocument) -> Result<DepartureTable, LoadError> {
    let mut table = HashMap::with_capacity(doc.len());

    for (stop_id, raws) in doc {
        let mut records = Vec::with_capacity(raws.len());
        for raw in raws {
            records.push(DepartureRecord {
                route_id: raw.route_id.into_string(),
                direction_id: raw.direction_id.into_string(),
                destination_name: raw.destination_name,
                departure_seconds: checked_seconds(&stop_id, raw.departure_seconds)?,
                trip_id: raw.trip_id.unwrap_or_default(),
                day_type: raw.day_type,
            });
        }
        table.insert(stop_id, records);
    }

    Ok(table)
}

fn expand_compact(doc: CompactDocument) -> Result<DepartureTable, LoadError> {
    let names = doc.names;
    let mut table = HashMap::with_capacity(doc.stops.len());

    for (stop_id, rows) in doc.stops {
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let name_index = row.2;
            let destination_name =
                names
                    .get(name_index)
                    .cloned()
                    .ok_or_else(|| LoadError::NameIndex {
                        stop_id: stop_id.clone(),
                        index: name_index,
                        len: names.len(),
                    })?;

            records.push(DepartureRecord {
                route_id: row.0.into_string(),
                direction_id: row.1.into_string(),
                destination_name,
                departure_seconds: checked_seconds(&stop_id, row.3)?,
                trip_id: row.5.unwrap_or_default(),
                day_type: DayType::from_code(&row.4),
            });
        }
        table.insert(stop_id, records);
    }

    Ok(table)
}
