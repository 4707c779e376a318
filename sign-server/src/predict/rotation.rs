//! Secondary-slot rotation.
//!
//! The sign shows two rows: the next train (rank 0) and one other train. On
//! each refresh the second row advances to the next rank, wrapping back to
//! rank 1 after the last, so every upcoming train gets shown in turn while
//! the next train stays pinned.

use crate::domain::Prediction;

/// Rotation memory for one display.
///
/// Remembers the rank last shown in the secondary slot. Starts empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationState {
    last_rank: Option<usize>,
}

impl RotationState {
    /// Fresh state with nothing remembered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rank shown in the secondary slot on the previous call, if any.
    pub fn remembered_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Pick the prediction for the secondary slot and remember its rank.
    ///
    /// - Fewer than two predictions: returns `None` and leaves the state
    ///   untouched.
    /// - Nothing remembered yet: picks index 1.
    /// - Remembered rank found at index `i`: picks `i + 1`, wrapping to
    ///   index 1 past the end.
    /// - Remembered rank missing from this list: falls back to index 1.
    ///
    /// Index 0 is never picked.
    ///
    /// # Examples
    ///
    /// ```
    /// use sign_server::domain::Prediction;
    /// use sign_server::predict::RotationState;
    ///
    /// let list: Vec<Prediction> = (0..3)
    ///     .map(|rank| Prediction {
    ///         route_id: "6".into(),
    ///         direction_id: "0".into(),
    ///         destination_name: "Pelham Bay Park".into(),
    ///         wait_seconds: 60 * rank as u32,
    ///         rank,
    ///         trip_id: String::new(),
    ///         is_express: false,
    ///     })
    ///     .collect();
    ///
    /// let mut state = RotationState::new();
    /// let shown: Vec<usize> = (0..4)
    ///     .map(|_| state.second_slot(&list).unwrap().rank)
    ///     .collect();
    /// assert_eq!(shown, vec![1, 2, 1, 2]);
    /// ```
    pub fn second_slot<'p>(&mut self, predictions: &'p [Prediction]) -> Option<&'p Prediction> {
        if predictions.len() < 2 {
            return None;
        }

        let idx = match self.last_rank {
            None => 1,
            Some(rank) => match predictions.iter().position(|p| p.rank == rank) {
                Some(i) if i + 1 < predictions.len() => i + 1,
                // Past the end, or the remembered rank is gone
                _ => 1,
            },
        };

        let chosen = &predictions[idx];
        self.last_rank = Some(chosen.rank);
        Some(chosen)
    }
}
