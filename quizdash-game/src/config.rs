//! Session configuration with validation and sanitization.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boost::BoostCfg;
use crate::constants;
use crate::questions::QuestionCfg;
use crate::settlement::SettlementCfg;

/// Errors raised when session configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f32,
        value: f32,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("duration_secs must be between {min} and {max} seconds (got {value})")]
    DurationOutOfRange { min: u32, max: u32, value: u32 },
    #[error("{field} must not be zero")]
    ZeroViolation { field: &'static str },
}

/// Complete tuning bundle for one race session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCfg {
    /// Countdown duration in whole seconds.
    #[serde(default = "SessionCfg::default_duration_secs")]
    pub duration_secs: u32,
    /// Base travel rate in meters per second.
    #[serde(default = "SessionCfg::default_base_rate")]
    pub base_rate: f32,
    #[serde(default)]
    pub boost: BoostCfg,
    #[serde(default)]
    pub question: QuestionCfg,
    #[serde(default)]
    pub settlement: SettlementCfg,
}

impl SessionCfg {
    #[must_use]
    pub const fn default_duration_secs() -> u32 {
        constants::SESSION_DURATION_SECS
    }

    #[must_use]
    pub const fn default_base_rate() -> f32 {
        constants::BASE_RATE_MPS
    }

    /// Validate configuration invariants before sanitization.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(constants::SESSION_DURATION_MIN..=constants::SESSION_DURATION_MAX)
            .contains(&self.duration_secs)
        {
            return Err(ConfigError::DurationOutOfRange {
                min: constants::SESSION_DURATION_MIN,
                max: constants::SESSION_DURATION_MAX,
                value: self.duration_secs,
            });
        }
        if !(constants::RATE_MIN_MPS..=constants::RATE_MAX_MPS).contains(&self.base_rate) {
            return Err(ConfigError::RangeViolation {
                field: "base_rate",
                min: constants::RATE_MIN_MPS,
                max: constants::RATE_MAX_MPS,
                value: self.base_rate,
            });
        }
        self.boost.validate()?;
        self.question.validate()?;
        self.settlement.validate()?;
        Ok(())
    }

    /// Clamp every field into its documented range.
    pub fn sanitize(&mut self) {
        self.duration_secs = self
            .duration_secs
            .clamp(constants::SESSION_DURATION_MIN, constants::SESSION_DURATION_MAX);
        if !self.base_rate.is_finite() {
            self.base_rate = Self::default_base_rate();
        }
        self.base_rate = self
            .base_rate
            .clamp(constants::RATE_MIN_MPS, constants::RATE_MAX_MPS);
        self.boost.sanitize();
        self.question.sanitize();
        self.settlement.sanitize();
    }
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            duration_secs: Self::default_duration_secs(),
            base_rate: Self::default_base_rate(),
            boost: BoostCfg::default(),
            question: QuestionCfg::default(),
            settlement: SettlementCfg::default(),
        }
    }
}
