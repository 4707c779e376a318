//! Arrival prediction and secondary-slot rotation.
//!
//! [`Predictor`] builds the ranked "next trains" list for a stop from the
//! historical dataset. [`RotationState`] then decides which of those trains
//! occupies the sign's second row on each refresh.

mod config;
mod engine;
mod rotation;

pub use config::EngineConfig;
pub use engine::{DepartureSource, Predictor, wait_seconds};
pub use rotation::RotationState;
