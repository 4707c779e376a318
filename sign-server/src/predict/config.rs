//! Prediction engine configuration.

use std::collections::BTreeSet;

/// Configuration parameters for building the arrival list.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of predictions returned (sign rows available).
    pub capacity: usize,

    /// Departures further away than this are dropped (seconds).
    /// A departure exactly at the horizon is kept.
    pub horizon_secs: u32,

    /// Routes that can run express service.
    pub express_routes: BTreeSet<String>,

    /// Substrings of a trip ID that mark an express run.
    pub express_markers: Vec<String>,
}

impl EngineConfig {
    /// Set the display capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the look-ahead horizon in seconds.
    pub fn with_horizon_secs(mut self, horizon_secs: u32) -> Self {
        self.horizon_secs = horizon_secs;
        self
    }

    /// Replace the set of express-capable routes.
    pub fn with_express_routes<I, R>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.express_routes = routes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a trip on this route is an express run.
    ///
    /// Only express-capable routes qualify, and only when the trip ID
    /// carries one of the markers.
    pub fn is_express(&self, route_id: &str, trip_id: &str) -> bool {
        self.express_routes.contains(route_id)
            && self
                .express_markers
                .iter()
                .any(|marker| trip_id.contains(marker.as_str()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 6,
            horizon_secs: 3600, // 1 hour
            express_routes: ["6", "7"].into_iter().map(String::from).collect(),
            express_markers: vec!["_X".to_string(), "EXPRESS".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.capacity, 6);
        assert_eq!(config.horizon_secs, 3600);
        assert!(config.express_routes.contains("6"));
        assert!(config.express_routes.contains("7"));
        assert_eq!(config.express_routes.len(), 2);
    }

    #[test]
    fn custom_config() {
        let config = EngineConfig::default()
            .with_capacity(4)
            .with_horizon_secs(1800)
            .with_express_routes(["A"]);

        assert_eq!(config.capacity, 4);
        assert_eq!(config.horizon_secs, 1800);
        assert!(config.is_express("A", "trip_X"));
        assert!(!config.is_express("6", "trip_X"));
    }

    #[test]
    fn express_needs_route_and_marker() {
        let config = EngineConfig::default();

        assert!(config.is_express("6", "t1_EXPRESS"));
        assert!(config.is_express("7", "0800_X_123"));
        assert!(!config.is_express("6", "t1"));
        assert!(!config.is_express("4", "t1_EXPRESS"));
        assert!(!config.is_express("6", ""));
        // Markers are case-sensitive
        assert!(!config.is_express("6", "t1_express"));
    }
}
