//! Application state for the web layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dataset::SharedDataset;
use crate::display::SignSessions;
use crate::predict::EngineConfig;

/// Shared application state.
///
/// Contains everything needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Reloadable historical dataset
    pub dataset: SharedDataset,

    /// Prediction engine configuration
    pub engine: Arc<EngineConfig>,

    /// Rotation memory per display
    pub sessions: SignSessions,

    /// Seconds between sign page refreshes
    pub refresh_secs: u32,

    /// Source of IDs for sign pages opened without one
    display_counter: Arc<AtomicU64>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(dataset: SharedDataset, engine: EngineConfig, sessions: SignSessions) -> Self {
        Self {
            dataset,
            engine: Arc::new(engine),
            sessions,
            refresh_secs: 5,
            display_counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Set the sign page refresh period.
    pub fn with_refresh_secs(mut self, refresh_secs: u32) -> Self {
        self.refresh_secs = refresh_secs;
        self
    }

    /// A display ID not handed out before by this server.
    pub fn fresh_display_id(&self) -> String {
        let n = self.display_counter.fetch_add(1, Ordering::Relaxed);
        format!("tab-{n}")
    }
}
