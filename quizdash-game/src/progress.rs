//! Persisted lesson-progress records.
//!
//! The platform keeps an array of these per user in its key-value store;
//! the engine only touches them through the injected [`crate::ProgressStore`]
//! collaborator, never through ambient global storage.
use serde::{Deserialize, Serialize};

use crate::settlement::SettlementResult;

/// One lesson's accumulated mini-game results for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub lesson_id: String,
    /// Set once the lesson's mini-game has been finished at least once.
    #[serde(default)]
    pub completed: bool,
    /// Highest score across runs.
    #[serde(default)]
    pub best_score: u32,
    /// Coins earned across all runs of this lesson.
    #[serde(default)]
    pub coins: u32,
}

impl LessonProgress {
    /// Fresh record for a lesson that has never been played.
    #[must_use]
    pub fn new(lesson_id: &str) -> Self {
        Self {
            lesson_id: lesson_id.to_string(),
            completed: false,
            best_score: 0,
            coins: 0,
        }
    }

    /// Fold a settled run into this record.
    pub fn absorb(&mut self, result: &SettlementResult) {
        self.completed = true;
        self.best_score = self.best_score.max(result.score);
        self.coins = self.coins.saturating_add(result.coins_earned);
    }
}
