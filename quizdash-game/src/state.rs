//! Race run state and its read-only projection.
use serde::{Deserialize, Serialize};

use crate::constants;

/// Lifecycle of a race session. Transitions are one-directional:
/// `Running` becomes `Ended` and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Ended,
}

/// Why a session reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Countdown reached zero.
    TimeExpired,
    /// Player closed the game screen mid-run.
    PlayerClosed,
    /// Wrong answer under the end-run policy.
    Collision,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimeExpired => write!(f, "time_expired"),
            Self::PlayerClosed => write!(f, "player_closed"),
            Self::Collision => write!(f, "collision"),
        }
    }
}

/// Requested lane movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneShift {
    Left,
    Right,
}

/// Mutable state of one race run, owned exclusively by its controller.
///
/// Invariants held by every transition: `lane <= 2`, `time_left` never
/// increases, `distance` and `score` never decrease, and no field changes
/// once `status` is `Ended`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceState {
    /// Remaining countdown in whole seconds.
    pub time_left: u32,
    /// Meters traveled so far.
    pub distance: f32,
    /// Points earned from correct answers.
    pub score: u32,
    /// Current lane index, `0..=2` with `1` the center lane.
    pub lane: u8,
    /// Whether the boost window is currently open.
    pub boost_active: bool,
    pub status: SessionStatus,
    /// Present only once `status` is `Ended`.
    pub end_reason: Option<EndReason>,
    /// Prompts raised so far.
    pub questions_asked: u32,
    /// Prompts answered correctly.
    pub questions_correct: u32,
}

impl RaceState {
    /// Fresh running state with the given countdown duration.
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            time_left: duration_secs,
            distance: 0.0,
            score: 0,
            lane: constants::LANE_START,
            boost_active: false,
            status: SessionStatus::Running,
            end_reason: None,
            questions_asked: 0,
            questions_correct: 0,
        }
    }

    /// Whether the session still accepts transitions.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.status, SessionStatus::Running)
    }

    /// Read-only projection consumed by rendering.
    #[must_use]
    pub const fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            time_left: self.time_left,
            distance: self.distance,
            score: self.score,
            lane: self.lane,
            boost_active: self.boost_active,
            status: self.status,
        }
    }

    pub(crate) fn end(&mut self, reason: EndReason) {
        if !self.is_running() {
            return;
        }
        self.status = SessionStatus::Ended;
        self.end_reason = Some(reason);
        self.boost_active = false;
        log::info!(
            "session ended: reason={reason} distance={:.1} score={}",
            self.distance,
            self.score
        );
    }
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new(constants::SESSION_DURATION_SECS)
    }
}

/// Compact view of a [`RaceState`] handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub time_left: u32,
    pub distance: f32,
    pub score: u32,
    pub lane: u8,
    pub boost_active: bool,
    pub status: SessionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_starts_centered_and_running() {
        let state = RaceState::new(90);
        assert_eq!(state.time_left, 90);
        assert_eq!(state.lane, 1);
        assert_eq!(state.score, 0);
        assert!(state.is_running());
        assert!(state.end_reason.is_none());
    }

    #[test]
    fn end_is_terminal_and_clears_boost() {
        let mut state = RaceState::default();
        state.boost_active = true;
        state.end(EndReason::PlayerClosed);
        assert_eq!(state.status, SessionStatus::Ended);
        assert!(!state.boost_active);

        // A second end request must not overwrite the original reason.
        state.end(EndReason::TimeExpired);
        assert_eq!(state.end_reason, Some(EndReason::PlayerClosed));
    }

    #[test]
    fn snapshot_mirrors_state_fields() {
        let mut state = RaceState::default();
        state.distance = 321.5;
        state.score = 30;
        state.lane = 2;
        let snap = state.snapshot();
        assert_eq!(snap.score, 30);
        assert_eq!(snap.lane, 2);
        assert_eq!(snap.status, SessionStatus::Running);
        assert!((snap.distance - 321.5).abs() < f32::EPSILON);
    }
}
