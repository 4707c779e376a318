//! Predicted arrivals as shown on the sign.

use serde::Serialize;

/// A ranked, time-relative arrival derived from a departure record.
///
/// Predictions are recomputed on every refresh and never stored. Across
/// refreshes an entry is identified only by its `rank`, never by `trip_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub route_id: String,
    pub direction_id: String,
    pub destination_name: String,
    /// Seconds until departure, already adjusted for midnight wraparound.
    pub wait_seconds: u32,
    /// Zero-based position in the sorted, truncated list.
    pub rank: usize,
    pub trip_id: String,
    pub is_express: bool,
}

impl Prediction {
    /// Whole minutes until departure, rounded to nearest (halves round up).
    ///
    /// # Examples
    ///
    /// ```
    /// use sign_server::domain::Prediction;
    ///
    /// let p = Prediction {
    ///     route_id: "6".into(),
    ///     direction_id: "0".into(),
    ///     destination_name: "Brooklyn Bridge".into(),
    ///     wait_seconds: 90,
    ///     rank: 0,
    ///     trip_id: String::new(),
    ///     is_express: false,
    /// };
    /// assert_eq!(p.minutes(), 2);
    /// ```
    pub fn minutes(&self) -> u32 {
        (self.wait_seconds + 30) / 60
    }
}
