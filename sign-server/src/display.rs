//! Simulated sign sessions.
//!
//! Each physical sign owns its own rotation memory, so several signs (or
//! browser tabs) can cycle through the same station independently.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Timelike};
use moka::future::Cache as MokaCache;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::Prediction;
use crate::predict::{DepartureSource, Predictor, RotationState};

/// What a two-row sign shows after one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// The next train (rank 0).
    pub primary: Option<Prediction>,
    /// The rotating second row.
    pub secondary: Option<Prediction>,
    /// How many predictions were available this cycle.
    pub total: usize,
}

impl Frame {
    /// True when there are no upcoming trains to show.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }
}

/// One display's state across refreshes.
#[derive(Debug, Clone, Default)]
pub struct SignSession {
    rotation: RotationState,
}

impl SignSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predict for `stop_id` and build this cycle's frame.
    pub fn refresh<S, T>(
        &mut self,
        predictor: &Predictor<'_, S>,
        stop_id: &str,
        direction: Option<u32>,
        now: &T,
    ) -> Frame
    where
        S: DepartureSource,
        T: Datelike + Timelike,
    {
        let predictions = predictor.predict(stop_id, direction, now);
        self.frame(&predictions)
    }

    /// Build a frame from an already-computed list, advancing the rotation.
    pub fn frame(&mut self, predictions: &[Prediction]) -> Frame {
        Frame {
            primary: predictions.first().cloned(),
            secondary: self.rotation.second_slot(predictions).cloned(),
            total: predictions.len(),
        }
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }
}

/// Shared handle to one display's session.
pub type SessionHandle = Arc<Mutex<SignSession>>;

/// Sessions keyed by display ID.
///
/// Entries expire after going unused for `idle`. Past `max_sessions` the
/// cache evicts old entries rather than refusing new displays.
#[derive(Clone)]
pub struct SignSessions {
    sessions: MokaCache<String, SessionHandle>,
}

impl SignSessions {
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(idle)
            .max_capacity(max_sessions)
            .build();
        Self { sessions }
    }

    /// The session for `display_id`, created on first use.
    ///
    /// Lock the returned handle for the whole predict-and-rotate step.
    pub async fn get_or_create(&self, display_id: &str) -> SessionHandle {
        self.sessions
            .get_with_by_ref(display_id, async { Arc::new(Mutex::new(SignSession::new())) })
            .await
    }

    /// Number of tracked displays (approximate until pending evictions run).
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending expirations and evictions.
    pub async fn run_pending_tasks(&self) {
        self.sessions.run_pending_tasks().await;
    }
}
