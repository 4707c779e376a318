//! Web layer for the arrival sign.
//!
//! Serves the station list, raw predictions, per-display frames (JSON) and
//! an HTML rendition of the sign.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
