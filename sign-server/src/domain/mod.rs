//! Domain types for the arrival sign.
//!
//! Records and stations are immutable once loaded; predictions are derived
//! fresh on every refresh. The time helpers classify an instant without
//! touching the clock.

mod day_type;
mod departure;
mod prediction;
mod station;
mod time;

pub use day_type::DayType;
pub use departure::{DepartureRecord, SECONDS_PER_DAY};
pub use prediction::Prediction;
pub use station::{Coordinates, DirectionLabels, Station};
pub use time::{classify_day, seconds_since_midnight};
