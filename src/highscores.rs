//! Best score per rule variant
//!
//! Persisted to LocalStorage, one best for modern and one for classic.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::Mode;

/// Best scores, kept separately per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    #[serde(default)]
    pub modern: u64,
    #[serde(default)]
    pub classic: u64,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "snake_arcade_best_scores";

    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Modern => self.modern,
            Mode::Classic => self.classic,
        }
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, mode: Mode, score: u64) -> bool {
        score > self.best(mode)
    }

    /// Record a finished game. Returns true when it set a new best.
    pub fn record(&mut self, mode: Mode, score: u64) -> bool {
        if !self.qualifies(mode, score) {
            return false;
        }
        match mode {
            Mode::Modern => self.modern = score,
            Mode::Classic => self.classic = score,
        }
        true
    }

    /// Load best scores from storage (empty table when missing or unreadable)
    pub fn load() -> Self {
        match storage::load_json::<Self>(Self::STORAGE_KEY) {
            Some(scores) => {
                log::info!(
                    "Loaded best scores (modern {}, classic {})",
                    scores.modern,
                    scores.classic
                );
                scores
            }
            None => {
                log::info!("No best scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save best scores to storage. Failures are logged and ignored.
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Best scores saved");
        }
    }
}
