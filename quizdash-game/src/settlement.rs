//! End-of-session settlement: turning a finished run into a coin reward.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::constants;
use crate::state::RaceState;

/// Rounding behavior for the distance bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Round to the nearest integer
    Nearest,
    /// Always round down (floor)
    #[default]
    Down,
    /// Always round up (ceiling)
    Up,
}

impl Rounding {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply(self, value: f32) -> u32 {
        let rounded = match self {
            Self::Nearest => value.round(),
            Self::Down => value.floor(),
            Self::Up => value.ceil(),
        };
        if rounded <= 0.0 { 0 } else { rounded as u32 }
    }
}

/// Reward policy applied once a session has ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementCfg {
    /// Score points per coin; `coins = floor(score / coins_per_score)`.
    #[serde(default = "SettlementCfg::default_coins_per_score")]
    pub coins_per_score: u32,
    /// Bonus coins per kilometer traveled, rounded per `rounding`.
    #[serde(default = "SettlementCfg::default_distance_bonus")]
    pub distance_bonus_per_km: f32,
    #[serde(default)]
    pub rounding: Rounding,
    /// Upper bound for a single session's reward.
    #[serde(default = "SettlementCfg::default_coin_cap")]
    pub coin_cap: u32,
}

impl SettlementCfg {
    const fn default_coins_per_score() -> u32 {
        constants::COINS_PER_SCORE
    }

    const fn default_distance_bonus() -> f32 {
        constants::DISTANCE_BONUS_PER_KM
    }

    const fn default_coin_cap() -> u32 {
        constants::COIN_CAP
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.coins_per_score == 0 {
            return Err(ConfigError::ZeroViolation {
                field: "settlement.coins_per_score",
            });
        }
        if self.distance_bonus_per_km < 0.0 {
            return Err(ConfigError::MinViolation {
                field: "settlement.distance_bonus_per_km",
                min: 0.0,
                value: self.distance_bonus_per_km,
            });
        }
        if self.coin_cap == 0 {
            return Err(ConfigError::ZeroViolation {
                field: "settlement.coin_cap",
            });
        }
        Ok(())
    }

    pub(crate) fn sanitize(&mut self) {
        if self.coins_per_score == 0 {
            self.coins_per_score = Self::default_coins_per_score();
        }
        if !self.distance_bonus_per_km.is_finite() || self.distance_bonus_per_km < 0.0 {
            self.distance_bonus_per_km = Self::default_distance_bonus();
        }
        if self.coin_cap == 0 {
            self.coin_cap = Self::default_coin_cap();
        }
    }
}

impl Default for SettlementCfg {
    fn default() -> Self {
        Self {
            coins_per_score: Self::default_coins_per_score(),
            distance_bonus_per_km: Self::default_distance_bonus(),
            rounding: Rounding::default(),
            coin_cap: Self::default_coin_cap(),
        }
    }
}

/// Immutable reward summary produced once per ended session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub distance: f32,
    pub score: u32,
    pub coins_earned: u32,
}

/// Settling a session that has not ended is a programming error, not a
/// user-facing failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("session is still running; settlement requires an ended session")]
    SessionStillRunning,
}

/// Compute the coin reward for a finished run.
///
/// Pure and deterministic: the same state and config always yield the same
/// result.
///
/// # Errors
///
/// Returns `SettlementError::SessionStillRunning` when the session has not
/// reached a terminal state.
pub fn settle(state: &RaceState, cfg: &SettlementCfg) -> Result<SettlementResult, SettlementError> {
    if state.is_running() {
        return Err(SettlementError::SessionStillRunning);
    }
    let base = state.score / cfg.coins_per_score;
    let bonus = cfg
        .rounding
        .apply(state.distance / 1_000.0 * cfg.distance_bonus_per_km);
    let coins_earned = base.saturating_add(bonus).min(cfg.coin_cap);
    Ok(SettlementResult {
        distance: state.distance,
        score: state.score,
        coins_earned,
    })
}
