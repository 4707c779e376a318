//! In-memory dataset store.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::decode::{DepartureTable, parse_departures, parse_stations};
use super::error::LoadError;
use crate::domain::{DepartureRecord, Station};

/// Station topology plus historical departures, held in memory.
///
/// All tables are replaced together: a failed [`load`](Self::load) leaves the
/// previous contents untouched.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    /// Stations in document order.
    stations: Vec<Station>,
    /// Stop ID → index into `stations`.
    by_id: HashMap<String, usize>,
    /// Stop IDs that appear as some station's child.
    child_ids: HashSet<String>,
    departures: DepartureTable,
}

impl DatasetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the two raw documents.
    pub fn from_slices(stations: &[u8], departures: &[u8]) -> Result<Self, LoadError> {
        let stations = parse_stations(stations)?;
        let departures = parse_departures(departures)?;
        Self::build(stations, departures)
    }

    /// Replace the store's contents with the given documents.
    ///
    /// Parsing and validation happen before anything is swapped in, so on
    /// error the store still holds its previous tables.
    pub fn load(&mut self, stations: &[u8], departures: &[u8]) -> Result<(), LoadError> {
        let fresh = Self::from_slices(stations, departures)?;
        *self = fresh;
        Ok(())
    }

    fn build(stations: Vec<Station>, departures: DepartureTable) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            if by_id.insert(station.stop_id.clone(), idx).is_some() {
                return Err(LoadError::DuplicateStop(station.stop_id.clone()));
            }
        }

        let mut child_ids = HashSet::new();
        for station in &stations {
            for child in &station.child_stop_ids {
                if !by_id.contains_key(child) {
                    return Err(LoadError::UnknownChild {
                        parent: station.stop_id.clone(),
                        child: child.clone(),
                    });
                }
                child_ids.insert(child.clone());
            }
        }

        check_acyclic(&stations, &by_id)?;

        let store = Self {
            stations,
            by_id,
            child_ids,
            departures,
        };
        info!(
            stations = store.station_count(),
            departures = store.departure_count(),
            "dataset loaded"
        );
        Ok(store)
    }

    /// Stations suitable for a station picker.
    ///
    /// Children of complexes are excluded; order follows the topology
    /// document.
    pub fn stations_for_display(&self) -> Vec<&Station> {
        self.stations
            .iter()
            .filter(|s| !self.child_ids.contains(&s.stop_id))
            .collect()
    }

    /// Look up a station by stop ID.
    pub fn station(&self, stop_id: &str) -> Option<&Station> {
        self.by_id.get(stop_id).map(|&idx| &self.stations[idx])
    }

    /// Child stop IDs of a complex, in listed order. Empty if the stop is
    /// unknown or has no children.
    pub fn children_of(&self, stop_id: &str) -> &[String] {
        self.station(stop_id)
            .map(|s| s.child_stop_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Historical departures for one stop, in document order.
    pub fn departures_for(&self, stop_id: &str) -> &[DepartureRecord] {
        self.departures
            .get(stop_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find displayable stations by name substring or exact stop ID.
    ///
    /// Matching is case-insensitive. Results are ordered by name.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Station> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Station> = self
            .stations_for_display()
            .into_iter()
            .filter(|s| {
                s.stop_id.eq_ignore_ascii_case(&needle)
                    || s.display_name.to_lowercase().contains(&needle)
            })
            .collect();
        matches.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        matches.truncate(limit);
        debug!(query, found = matches.len(), "station search");
        matches
    }

    /// Number of stations, children included.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Total departure records across all stops.
    pub fn departure_count(&self) -> usize {
        self.departures.values().map(Vec::len).sum()
    }
}

/// Reject any parent→child chain that leads back to where it started.
///
/// Every child ID must already be known to `by_id`.
fn check_acyclic(stations: &[Station], by_id: &HashMap<String, usize>) -> Result<(), LoadError> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; stations.len()];

    for start in 0..stations.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        // (station index, next child to visit)
        let mut stack = vec![(start, 0usize)];
        marks[start] = Mark::OnPath;

        while let Some(&(node, next)) = stack.last() {
            let Some(child_id) = stations[node].child_stop_ids.get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let Some(&child) = by_id.get(child_id) else {
                continue;
            };
            match marks[child] {
                Mark::OnPath => return Err(LoadError::Cycle(child_id.clone())),
                Mark::Unvisited => {
                    marks[child] = Mark::OnPath;
                    stack.push((child, 0));
                }
                Mark::Done => {}
            }
        }
    }

    Ok(())
}
