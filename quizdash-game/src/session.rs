//! High-level session wrapper binding a race controller to a mutable state.
use crate::boost::BoostHandle;
use crate::config::{ConfigError, SessionCfg};
use crate::controller::{QuestionPrompt, RaceController};
use crate::settlement::{SettlementError, SettlementResult, settle};
use crate::state::{LaneShift, RaceSnapshot, RaceState, SessionStatus};

/// One run of the racing mini-game from start to terminal end.
#[derive(Debug, Clone)]
pub struct RaceSession {
    controller: RaceController,
    state: RaceState,
}

impl RaceSession {
    /// Construct a fresh session from configuration and a user seed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration violates its bounds.
    pub fn new(cfg: SessionCfg, seed: u64) -> Result<Self, ConfigError> {
        let controller = RaceController::new(cfg, seed)?;
        let state = RaceState::new(controller.config().duration_secs);
        Ok(Self { controller, state })
    }

    /// One-second countdown tick.
    pub fn tick_second(&mut self) -> SessionStatus {
        self.controller.tick_second(&mut self.state)
    }

    /// Per-frame distance accrual; yields a prompt on interval crossings.
    pub fn tick_frame(&mut self, dt_secs: f32) -> Option<QuestionPrompt> {
        self.controller.tick_frame(&mut self.state, dt_secs)
    }

    /// Clamped lane change.
    pub fn change_lane(&mut self, shift: LaneShift) {
        self.controller.change_lane(&mut self.state, shift);
    }

    /// Open the boost window; `None` when the press is a no-op.
    pub fn press_boost(&mut self) -> Option<BoostHandle> {
        self.controller.press_boost(&mut self.state)
    }

    /// Deliver the deferred boost reset for `handle`.
    pub fn boost_elapsed(&mut self, handle: BoostHandle) {
        self.controller.boost_elapsed(&mut self.state, handle);
    }

    /// Report the outcome of the current question prompt.
    pub fn resolve_question(&mut self, correct: bool) {
        self.controller.resolve_question(&mut self.state, correct);
    }

    /// Player-initiated close.
    pub fn close(&mut self) {
        self.controller.close(&mut self.state);
    }

    /// Settle this session into a coin reward.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::SessionStillRunning` while the session has
    /// not reached a terminal state.
    pub fn settle(&self) -> Result<SettlementResult, SettlementError> {
        settle(&self.state, &self.controller.config().settlement)
    }

    /// Borrow the underlying immutable run state.
    #[must_use]
    pub const fn state(&self) -> &RaceState {
        &self.state
    }

    /// Read-only projection for rendering.
    #[must_use]
    pub const fn snapshot(&self) -> RaceSnapshot {
        self.state.snapshot()
    }

    /// Borrow the controller.
    #[must_use]
    pub const fn controller(&self) -> &RaceController {
        &self.controller
    }

    /// Consume the session, returning the underlying run state.
    #[must_use]
    pub fn into_state(self) -> RaceState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EndReason;

    #[test]
    fn session_wires_controller_and_state() {
        let mut session = RaceSession::new(SessionCfg::default(), 99).expect("valid cfg");
        assert_eq!(session.snapshot().lane, 1);

        session.change_lane(LaneShift::Right);
        let _ = session.tick_frame(0.5);
        assert_eq!(session.state().lane, 2);
        assert!(session.state().distance > 0.0);

        session.close();
        assert_eq!(session.state().end_reason, Some(EndReason::PlayerClosed));
        let result = session.settle().expect("ended session settles");
        assert_eq!(result.score, 0);
    }

    #[test]
    fn settle_before_end_signals_misuse() {
        let session = RaceSession::new(SessionCfg::default(), 1).expect("valid cfg");
        assert!(session.settle().is_err());
    }

    #[test]
    fn into_state_preserves_run_totals() {
        let mut session = RaceSession::new(SessionCfg::default(), 5).expect("valid cfg");
        session.resolve_question(true);
        session.close();
        let state = session.into_state();
        assert_eq!(state.score, 10);
        assert_eq!(state.questions_correct, 1);
    }
}
