//! Dataset loading errors.

/// Errors that can occur while loading the station topology or the
/// historical departures.
///
/// Any of these aborts the whole load; the store keeps whatever tables it
/// held before.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading a dataset file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or does not match the expected shape
    #[error("invalid {document} document: {source}")]
    Json {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Two stations share a stop ID
    #[error("duplicate station {0}")]
    DuplicateStop(String),

    /// A complex lists a child that is not in the topology
    #[error("station {parent} lists unknown child {child}")]
    UnknownChild { parent: String, child: String },

    /// The parent/child graph loops back on itself
    #[error("station {0} is its own descendant")]
    Cycle(String),

    /// Compacted record points past the end of the name table
    #[error("stop {stop_id}: name index {index} outside name table of {len} entries")]
    NameIndex {
        stop_id: String,
        index: usize,
        len: usize,
    },

    /// Departure time is not a valid offset into the day
    #[error("stop {stop_id}: departure time {seconds} outside 0..86400")]
    DepartureOutOfRange { stop_id: String, seconds: i64 },
}

impl LoadError {
    pub(crate) fn stations_json(source: serde_json::Error) -> Self {
        LoadError::Json {
            document: "stations",
            source,
        }
    }

    pub(crate) fn departures_json(source: serde_json::Error) -> Self {
        LoadError::Json {
            document: "departures",
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoadError::DuplicateStop("635".into());
        assert_eq!(err.to_string(), "duplicate station 635");

        let err = LoadError::UnknownChild {
            parent: "635".into(),
            child: "L03".into(),
        };
        assert_eq!(err.to_string(), "station 635 lists unknown child L03");

        let err = LoadError::Cycle("A".into());
        assert_eq!(err.to_string(), "station A is its own descendant");

        let err = LoadError::NameIndex {
            stop_id: "101".into(),
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "stop 101: name index 4 outside name table of 2 entries"
        );

        let err = LoadError::DepartureOutOfRange {
            stop_id: "101".into(),
            seconds: 90000,
        };
        assert_eq!(
            err.to_string(),
            "stop 101: departure time 90000 outside 0..86400"
        );
    }

    #[test]
    fn json_error_names_document() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoadError::departures_json(source);
        assert!(err.to_string().starts_with("invalid departures document"));
    }
}
