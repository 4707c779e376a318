//! Arrival list construction.
//!
//! Turns the historical departures for a stop (and its child stops) into a
//! ranked list of upcoming trains relative to a given instant:
//!
//! 1. Keep records for today's day type and, if given, the requested
//!    direction.
//! 2. Compute the wait, adding a day when the naive difference is negative
//!    (a departure "before now" is really after the coming midnight).
//! 3. Drop anything beyond the horizon.
//! 4. Stable-sort by wait, number the results, and cut to capacity.

use std::collections::HashSet;

use chrono::{Datelike, Timelike};
use tracing::debug;

use super::config::EngineConfig;
use crate::dataset::DatasetStore;
use crate::domain::{
    DepartureRecord, Prediction, SECONDS_PER_DAY, classify_day, seconds_since_midnight,
};

/// Source of historical departures and stop groupings.
///
/// Implemented by [`DatasetStore`]; tests supply in-memory sources.
pub trait DepartureSource {
    /// Departures recorded at one stop, in source order.
    fn departures_for(&self, stop_id: &str) -> &[DepartureRecord];

    /// Child stops merged into this stop's predictions, in listed order.
    fn children_of(&self, stop_id: &str) -> &[String];
}

impl DepartureSource for DatasetStore {
    fn departures_for(&self, stop_id: &str) -> &[DepartureRecord] {
        DatasetStore::departures_for(self, stop_id)
    }

    fn children_of(&self, stop_id: &str) -> &[String] {
        DatasetStore::children_of(self, stop_id)
    }
}

/// Seconds from `now_secs` until `departure_secs`, wrapping past midnight.
///
/// Returns `None` only if the wrapped value is still negative, which cannot
/// happen for in-range inputs.
pub fn wait_seconds(departure_secs: u32, now_secs: u32) -> Option<u32> {
    let mut wait = i64::from(departure_secs) - i64::from(now_secs);
    if wait < 0 {
        wait += i64::from(SECONDS_PER_DAY);
    }
    u32::try_from(wait).ok()
}

/// Builds arrival lists from a departure source.
pub struct Predictor<'a, S: DepartureSource> {
    source: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: DepartureSource> Predictor<'a, S> {
    /// Create a new predictor.
    pub fn new(source: &'a S, config: &'a EngineConfig) -> Self {
        Self { source, config }
    }

    /// Upcoming trains at `stop_id` as of `now`, nearest first.
    ///
    /// `direction` filters by direction ID when given. Unknown stops and
    /// stops with no matching departures produce an empty list. The result
    /// depends only on the arguments and the source, so repeated calls with
    /// the same inputs return the same list.
    pub fn predict<T>(&self, stop_id: &str, direction: Option<u32>, now: &T) -> Vec<Prediction>
    where
        T: Datelike + Timelike,
    {
        let today = classify_day(now);
        let now_secs = seconds_since_midnight(now);

        let mut candidates: Vec<(u32, &DepartureRecord)> = Vec::new();

        for stop in self.stop_set(stop_id) {
            for record in self.source.departures_for(stop) {
                if record.day_type != today {
                    continue;
                }
                if let Some(dir) = direction
                    && !record.matches_direction(dir)
                {
                    continue;
                }
                let Some(wait) = wait_seconds(record.departure_seconds, now_secs) else {
                    continue;
                };
                if wait > self.config.horizon_secs {
                    continue;
                }
                candidates.push((wait, record));
            }
        }

        // sort_by_key is stable: equal waits keep source order
        candidates.sort_by_key(|(wait, _)| *wait);

        let predictions: Vec<Prediction> = candidates
            .into_iter()
            .take(self.config.capacity)
            .enumerate()
            .map(|(rank, (wait, record))| Prediction {
                route_id: record.route_id.clone(),
                direction_id: record.direction_id.clone(),
                destination_name: record.destination_name.clone(),
                wait_seconds: wait,
                rank,
                trip_id: record.trip_id.clone(),
                is_express: self.config.is_express(&record.route_id, &record.trip_id),
            })
            .collect();

        debug!(
            stop_id,
            ?direction,
            day = %today,
            now_secs,
            count = predictions.len(),
            "predicted arrivals"
        );

        predictions
    }

    /// The stop itself followed by its children, without repeats.
    fn stop_set<'s>(&'s self, stop_id: &'s str) -> Vec<&'s str> {
        let mut seen = HashSet::new();
        std::iter::once(stop_id)
            .chain(self.source.children_of(stop_id).iter().map(String::as_str))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
