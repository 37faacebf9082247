//! Race controller: applies tick and input transitions to a run state.
//!
//! Every transition is a no-op once the session has ended. Invalid inputs
//! are absorbed silently rather than signaled, mirroring the disabled-button
//! affordances at the UI boundary.
use crate::boost::BoostHandle;
use crate::config::{ConfigError, SessionCfg};
use crate::constants;
use crate::questions::{QuestionPicker, QuestionScheduler, WrongAnswerPolicy};
use crate::state::{EndReason, LaneShift, RaceState, SessionStatus};

/// Prompt raised when the run crosses a question interval. The quiz overlay
/// presents it and reports back through `resolve_question`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionPrompt {
    /// Index into the lesson's question bank.
    pub question_id: u32,
    /// One-based position of this prompt within the run.
    pub ordinal: u32,
}

/// Transition driver for one race run.
///
/// The controller holds tuning and the deterministic question stream; the
/// mutable [`RaceState`] is passed into each transition, keeping state
/// serializable independently of the driver.
#[derive(Debug, Clone)]
pub struct RaceController {
    cfg: SessionCfg,
    picker: QuestionPicker,
    scheduler: QuestionScheduler,
    boost_epoch: u64,
}

impl RaceController {
    /// Build a controller from validated configuration and a user seed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the configuration violates its bounds.
    pub fn new(cfg: SessionCfg, seed: u64) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut cfg = cfg;
        cfg.sanitize();
        let picker = QuestionPicker::from_user_seed(seed, cfg.question.bank_size);
        let scheduler = QuestionScheduler::new(cfg.question.interval_m);
        Ok(Self {
            cfg,
            picker,
            scheduler,
            boost_epoch: 0,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SessionCfg {
        &self.cfg
    }

    /// One-second countdown tick. Ends the session with `TimeExpired` when
    /// the countdown reaches zero. Returns the post-tick status.
    pub fn tick_second(&mut self, state: &mut RaceState) -> SessionStatus {
        if !state.is_running() {
            return state.status;
        }
        state.time_left = state.time_left.saturating_sub(1);
        if state.time_left == 0 {
            state.end(EndReason::TimeExpired);
        }
        state.status
    }

    /// Per-frame distance accrual. `dt_secs` is the frame delta; hostile or
    /// glitched deltas are clamped rather than rejected. Returns a prompt
    /// when the new distance crosses a question interval.
    pub fn tick_frame(&mut self, state: &mut RaceState, dt_secs: f32) -> Option<QuestionPrompt> {
        if !state.is_running() {
            return None;
        }
        let dt = if dt_secs.is_finite() {
            dt_secs.clamp(0.0, constants::FRAME_DT_MAX_SECS)
        } else {
            0.0
        };
        let multiplier = if state.boost_active {
            self.cfg.boost.multiplier
        } else {
            1.0
        };
        state.distance += self.cfg.base_rate * dt * multiplier;

        if !self.scheduler.crossed(state.distance) {
            return None;
        }
        state.questions_asked += 1;
        let prompt = QuestionPrompt {
            question_id: self.picker.next_question(),
            ordinal: state.questions_asked,
        };
        log::debug!(
            "question prompt: id={} ordinal={} at {:.1}m",
            prompt.question_id,
            prompt.ordinal,
            state.distance
        );
        Some(prompt)
    }

    /// Clamped lane change. Requests that would leave `0..=2` are no-ops.
    pub fn change_lane(&mut self, state: &mut RaceState, shift: LaneShift) {
        if !state.is_running() {
            return;
        }
        match shift {
            LaneShift::Left if state.lane > 0 => state.lane -= 1,
            LaneShift::Right if state.lane < constants::LANE_MAX => state.lane += 1,
            LaneShift::Left | LaneShift::Right => {}
        }
    }

    /// Open the boost window. Returns the handle the platform timer must
    /// deliver back via [`Self::boost_elapsed`] after the configured window,
    /// or `None` when the press is a no-op (already boosting, or ended).
    pub fn press_boost(&mut self, state: &mut RaceState) -> Option<BoostHandle> {
        if !state.is_running() || state.boost_active {
            return None;
        }
        state.boost_active = true;
        self.boost_epoch += 1;
        log::debug!("boost opened: epoch={}", self.boost_epoch);
        Some(BoostHandle {
            epoch: self.boost_epoch,
        })
    }

    /// Deferred boost reset. Stale handles (superseded epoch) and resets
    /// arriving after the session ended are discarded without mutation.
    pub fn boost_elapsed(&mut self, state: &mut RaceState, handle: BoostHandle) {
        if !state.is_running() || handle.epoch != self.boost_epoch {
            log::debug!("stale boost reset discarded: epoch={}", handle.epoch);
            return;
        }
        state.boost_active = false;
    }

    /// Outcome of a question prompt. Correct answers score points; wrong
    /// answers follow the configured policy.
    pub fn resolve_question(&mut self, state: &mut RaceState, correct: bool) {
        if !state.is_running() {
            return;
        }
        if correct {
            state.questions_correct += 1;
            let km_bonus = self.distance_bonus_points(state.distance);
            state.score = state
                .score
                .saturating_add(self.cfg.question.points)
                .saturating_add(km_bonus);
            return;
        }
        match self.cfg.question.wrong_answer {
            WrongAnswerPolicy::WithholdPoints => {}
            WrongAnswerPolicy::EndRun => state.end(EndReason::Collision),
        }
    }

    /// Explicit player-initiated close.
    pub fn close(&mut self, state: &mut RaceState) {
        state.end(EndReason::PlayerClosed);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn distance_bonus_points(&self, distance: f32) -> u32 {
        if self.cfg.question.points_per_km == 0 {
            return 0;
        }
        let km = (distance / 1_000.0).floor().max(0.0) as u32;
        km.saturating_mul(self.cfg.question.points_per_km)
    }
}
