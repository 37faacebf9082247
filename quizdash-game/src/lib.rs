//! Quizdash Race Engine
//!
//! Platform-agnostic core logic for the Quizdash racing mini-game.
//! This crate provides the session state machine, question cadence, and
//! reward settlement without UI or platform-specific dependencies.

pub mod boost;
pub mod config;
pub mod constants;
pub mod controller;
pub mod progress;
pub mod questions;
pub mod session;
pub mod settlement;
pub mod state;

// Re-export commonly used types
pub use boost::{BoostCfg, BoostHandle};
pub use config::{ConfigError, SessionCfg};
pub use controller::{QuestionPrompt, RaceController};
pub use progress::LessonProgress;
pub use questions::{QuestionCfg, WrongAnswerPolicy};
pub use session::RaceSession;
pub use settlement::{Rounding, SettlementCfg, SettlementError, SettlementResult, settle};
pub use state::{EndReason, LaneShift, RaceSnapshot, RaceState, SessionStatus};

/// Trait for abstracting progress persistence.
/// Platform-specific implementations should provide this.
pub trait ProgressStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every lesson-progress record for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be loaded.
    fn load_progress(&self, user: &str) -> Result<Vec<LessonProgress>, Self::Error>;

    /// Replace the stored records for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be saved.
    fn save_progress(&self, user: &str, records: &[LessonProgress]) -> Result<(), Self::Error>;

    /// Credit coins to a user's wallet, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet cannot be updated.
    fn add_coins(&self, user: &str, coins: u32) -> Result<u32, Self::Error>;
}

/// Engine facade tying session creation to reward persistence.
pub struct GameEngine<S>
where
    S: ProgressStore,
{
    cfg: SessionCfg,
    store: S,
}

impl<S> GameEngine<S>
where
    S: ProgressStore,
{
    /// Create an engine with the provided tuning and store.
    pub const fn new(cfg: SessionCfg, store: S) -> Self {
        Self { cfg, store }
    }

    #[must_use]
    pub const fn config(&self) -> &SessionCfg {
        &self.cfg
    }

    /// Start a new race session with the given seed.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine configuration is invalid.
    pub fn start_session(&self, seed: u64) -> Result<RaceSession, ConfigError> {
        RaceSession::new(self.cfg.clone(), seed)
    }

    /// Settle an ended run and persist the reward for `user` on `lesson_id`.
    ///
    /// The caller keeps ownership of rendering the end screen; this only
    /// computes the reward and writes it through the injected store.
    ///
    /// # Errors
    ///
    /// Returns an error when the session is still running or the store
    /// rejects the update.
    pub fn finish_session(
        &self,
        user: &str,
        lesson_id: &str,
        state: &RaceState,
    ) -> Result<SettlementResult, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let result = settle(state, &self.cfg.settlement)?;
        let mut records = self.store.load_progress(user).map_err(Into::into)?;
        match records.iter_mut().find(|r| r.lesson_id == lesson_id) {
            Some(record) => record.absorb(&result),
            None => {
                let mut record = LessonProgress::new(lesson_id);
                record.absorb(&result);
                records.push(record);
            }
        }
        self.store
            .save_progress(user, &records)
            .map_err(Into::into)?;
        let balance = self
            .store
            .add_coins(user, result.coins_earned)
            .map_err(Into::into)?;
        log::info!(
            "settled run: user={user} lesson={lesson_id} coins={} balance={balance}",
            result.coins_earned
        );
        Ok(result)
    }
}
