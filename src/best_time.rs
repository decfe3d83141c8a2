//! Session best time
//!
//! Only the fastest winning run of the current session is kept. Nothing is
//! written to storage.

use serde::{Deserialize, Serialize};

/// Fastest winning time (seconds) this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestTime {
    seconds: Option<f32>,
}

impl BestTime {
    pub fn new() -> Self {
        Self { seconds: None }
    }

    /// Check if a winning time would replace the current best
    pub fn qualifies(&self, elapsed: f32) -> bool {
        self.seconds.is_none_or(|best| elapsed < best)
    }

    /// Record a winning time. Returns true if it became the new best.
    pub fn record(&mut self, elapsed: f32) -> bool {
        if !self.qualifies(elapsed) {
            return false;
        }
        self.seconds = Some(elapsed);
        true
    }

    pub fn get(&self) -> Option<f32> {
        self.seconds
    }

    /// HUD text: two decimals, or a placeholder before the first win
    pub fn display(&self) -> String {
        match self.seconds {
            Some(s) => format!("{:.2}s", s),
            None => "--".to_string(),
        }
    }
}
