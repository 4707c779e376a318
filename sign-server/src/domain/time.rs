//! Day classification and time-of-day offsets.
//!
//! Both functions read only the local calendar fields of the instant they are
//! given, so callers decide the time zone (normally `Local::now()`). Nothing
//! here samples the clock.

use chrono::{Datelike, Timelike, Weekday};

use super::DayType;

/// Map an instant to the schedule bucket for its local calendar day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sign_server::domain::{DayType, classify_day};
///
/// // 2024-03-16 was a Saturday
/// let t = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// assert_eq!(classify_day(&t), DayType::Saturday);
/// ```
pub fn classify_day<T: Datelike>(instant: &T) -> DayType {
    match instant.weekday() {
        Weekday::Sun => DayType::Sunday,
        Weekday::Sat => DayType::Saturday,
        _ => DayType::Weekday,
    }
}

/// Seconds elapsed since local midnight, in `0..86400`.
///
/// Leap seconds (which chrono reports as nanoseconds ≥ 1e9) are ignored, so
/// the result never leaves the range.
pub fn seconds_since_midnight<T: Timelike>(instant: &T) -> u32 {
    instant.hour() * 3600 + instant.minute() * 60 + instant.second()
}
