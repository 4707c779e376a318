//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::DatasetFiles;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?} ({reason})")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: &'static str,
}

/// Runtime configuration for the sign server.
#[derive(Debug, Clone)]
pub struct SignConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Station topology document.
    pub stations_path: PathBuf,

    /// Historical departures document.
    pub departures_path: PathBuf,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// How often to re-read the dataset files. `None` loads once.
    pub reload_interval: Option<Duration>,

    /// Rows on the sign (prediction list capacity).
    pub capacity: usize,

    /// Upper bound on concurrently tracked displays.
    pub max_displays: u64,

    /// How long a display may go without refreshing before its rotation
    /// memory is dropped.
    pub display_idle: Duration,

    /// Seconds between sign page reloads.
    pub refresh_secs: u32,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stations_path: PathBuf::from("data/stations.json"),
            departures_path: PathBuf::from("data/departures.json"),
            static_dir: PathBuf::from("static"),
            reload_interval: None,
            capacity: 6,
            max_displays: 256,
            display_idle: Duration::from_secs(600),
            refresh_secs: 5,
        }
    }
}

impl SignConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("SIGN_BIND_ADDR") {
            config.bind_addr = value
                .parse()
                .map_err(|_| invalid("SIGN_BIND_ADDR", &value, "expected host:port"))?;
        }
        if let Some(value) = lookup("SIGN_STATIONS_PATH") {
            config.stations_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("SIGN_DEPARTURES_PATH") {
            config.departures_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("SIGN_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SIGN_RELOAD_SECS") {
            let secs: u64 = value
                .parse()
                .map_err(|_| invalid("SIGN_RELOAD_SECS", &value, "expected whole seconds"))?;
            // Zero would make the interval timer panic
            if secs == 0 {
                return Err(invalid("SIGN_RELOAD_SECS", &value, "must be positive"));
            }
            config.reload_interval = Some(Duration::from_secs(secs));
        }
        if let Some(value) = lookup("SIGN_CAPACITY") {
            config.capacity = value
                .parse()
                .map_err(|_| invalid("SIGN_CAPACITY", &value, "expected a row count"))?;
        }
        if let Some(value) = lookup("SIGN_MAX_DISPLAYS") {
            config.max_displays = value
                .parse()
                .map_err(|_| invalid("SIGN_MAX_DISPLAYS", &value, "expected a count"))?;
        }
        if let Some(value) = lookup("SIGN_DISPLAY_IDLE_SECS") {
            let secs = match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "SIGN_DISPLAY_IDLE_SECS",
                        &value,
                        "expected positive seconds",
                    ));
                }
            };
            config.display_idle = Duration::from_secs(secs);
        }
        if let Some(value) = lookup("SIGN_REFRESH_SECS") {
            config.refresh_secs = match value.parse::<u32>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "SIGN_REFRESH_SECS",
                        &value,
                        "expected positive seconds",
                    ));
                }
            };
        }

        Ok(config)
    }

    /// The dataset file pair.
    pub fn dataset_files(&self) -> DatasetFiles {
        DatasetFiles::new(&self.stations_path, &self.departures_path)
    }
}

fn invalid(key: &'static str, value: &str, reason: &'static str) -> ConfigError {
    ConfigError {
        key,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<SignConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SignConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.stations_path, PathBuf::from("data/stations.json"));
        assert_eq!(config.departures_path, PathBuf::from("data/departures.json"));
        assert_eq!(config.reload_interval, None);
        assert_eq!(config.capacity, 6);
        assert_eq!(config.max_displays, 256);
        assert_eq!(config.display_idle, Duration::from_secs(600));
        assert_eq!(config.refresh_secs, 5);
    }

    #[test]
    fn overrides() {
        let config = from_pairs(&[
            ("SIGN_BIND_ADDR", "0.0.0.0:8080"),
            ("SIGN_STATIONS_PATH", "/srv/stations.json"),
            ("SIGN_RELOAD_SECS", "600"),
            ("SIGN_CAPACITY", "4"),
            ("SIGN_DISPLAY_IDLE_SECS", "90"),
            ("SIGN_REFRESH_SECS", "10"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.stations_path, PathBuf::from("/srv/stations.json"));
        assert_eq!(config.reload_interval, Some(Duration::from_secs(600)));
        assert_eq!(config.capacity, 4);
        assert_eq!(config.display_idle, Duration::from_secs(90));
        assert_eq!(config.refresh_secs, 10);
        assert_eq!(
            config.dataset_files().stations,
            PathBuf::from("/srv/stations.json")
        );
    }

    #[test]
    fn bad_values_are_errors() {
        let err = from_pairs(&[("SIGN_CAPACITY", "six")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for SIGN_CAPACITY: \"six\" (expected a row count)"
        );

        assert!(from_pairs(&[("SIGN_BIND_ADDR", "localhost")]).is_err());
        assert!(from_pairs(&[("SIGN_RELOAD_SECS", "0")]).is_err());
        assert!(from_pairs(&[("SIGN_RELOAD_SECS", "-1")]).is_err());
        assert!(from_pairs(&[("SIGN_REFRESH_SECS", "0")]).is_err());
        assert!(from_pairs(&[("SIGN_DISPLAY_IDLE_SECS", "soon")]).is_err());
    }
}
