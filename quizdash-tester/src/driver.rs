//! Random input driver and per-step invariant checks.
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use quizdash_game::{BoostHandle, LaneShift, RaceSession, RaceSnapshot, SessionStatus};

/// A detected violation of the engine's documented invariants.
#[derive(Debug, Clone)]
pub struct Violation {
    pub step: u32,
    pub what: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {}: {}", self.step, self.what)
    }
}

/// Drives a session with pseudo-random events, modeling a chaotic player
/// plus an unreliable platform timer for the boost reset.
pub struct InputDriver {
    rng: SmallRng,
    pending_boost: Option<BoostHandle>,
    stale_boost: Option<BoostHandle>,
    correct_rate: f64,
}

impl InputDriver {
    #[must_use]
    pub fn new(seed: u64, correct_rate: f64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            pending_boost: None,
            stale_boost: None,
            correct_rate,
        }
    }

    /// Apply one random event to `run`.
    pub fn step(&mut self, run: &mut RaceSession) {
        match self.rng.gen_range(0..100u32) {
            0..=44 => {
                let dt = self.rng.gen_range(0.0..0.05f32);
                if run.tick_frame(dt).is_some() {
                    let correct = self.rng.gen_bool(self.correct_rate);
                    run.resolve_question(correct);
                }
            }
            45..=64 => {
                run.tick_second();
            }
            65..=81 => {
                let shift = if self.rng.gen_bool(0.5) {
                    LaneShift::Left
                } else {
                    LaneShift::Right
                };
                run.change_lane(shift);
            }
            82..=89 => {
                if let Some(handle) = run.press_boost() {
                    self.pending_boost = Some(handle);
                }
            }
            90..=96 => {
                if let Some(handle) = self.pending_boost.take() {
                    run.boost_elapsed(handle);
                    self.stale_boost = Some(handle);
                }
            }
            _ => {
                // Misbehaving timer: deliver an already-consumed handle.
                if let Some(handle) = self.stale_boost {
                    run.boost_elapsed(handle);
                }
            }
        }
    }
}

/// Compare consecutive snapshots against the documented invariants.
#[must_use]
pub fn check_step(step: u32, prev: &RaceSnapshot, next: &RaceSnapshot) -> Option<Violation> {
    if next.lane > 2 {
        return Some(Violation {
            step,
            what: format!("lane {} out of bounds", next.lane),
        });
    }
    if next.time_left > prev.time_left {
        return Some(Violation {
            step,
            what: format!("countdown increased {} -> {}", prev.time_left, next.time_left),
        });
    }
    if next.distance < prev.distance {
        return Some(Violation {
            step,
            what: format!("distance decreased {:.2} -> {:.2}", prev.distance, next.distance),
        });
    }
    if next.score < prev.score {
        return Some(Violation {
            step,
            what: format!("score decreased {} -> {}", prev.score, next.score),
        });
    }
    if prev.status == SessionStatus::Ended && next != prev {
        return Some(Violation {
            step,
            what: "ended session mutated".to_string(),
        });
    }
    None
}
