//! Boost window bookkeeping.
//!
//! The boost reset is a deferred transition scheduled by the platform layer
//! (a timer alongside the tick clock, not coupled to it). The engine cannot
//! cancel a platform timer, so every activation mints a [`BoostHandle`]
//! stamped with the controller's current epoch. When the timer fires, the
//! handle is passed back; a handle whose epoch no longer matches, or one
//! delivered after the session ended, is discarded without touching state.
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants;

/// Token minted by a boost activation and returned by the deferred reset.
///
/// Opaque to callers; the epoch inside it is the cancellation mechanism for
/// resets that outlive the session or a later activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostHandle {
    pub(crate) epoch: u64,
}

/// Boost tuning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostCfg {
    /// Distance rate multiplier while the window is open.
    #[serde(default = "BoostCfg::default_multiplier")]
    pub multiplier: f32,
    /// How long the window stays open, in seconds.
    #[serde(default = "BoostCfg::default_window_secs")]
    pub window_secs: f32,
}

impl BoostCfg {
    const fn default_multiplier() -> f32 {
        constants::BOOST_MULTIPLIER
    }

    const fn default_window_secs() -> f32 {
        constants::BOOST_WINDOW_SECS
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(constants::BOOST_MULTIPLIER_MIN..=constants::BOOST_MULTIPLIER_MAX)
            .contains(&self.multiplier)
        {
            return Err(ConfigError::RangeViolation {
                field: "boost.multiplier",
                min: constants::BOOST_MULTIPLIER_MIN,
                max: constants::BOOST_MULTIPLIER_MAX,
                value: self.multiplier,
            });
        }
        if !(constants::BOOST_WINDOW_MIN_SECS..=constants::BOOST_WINDOW_MAX_SECS)
            .contains(&self.window_secs)
        {
            return Err(ConfigError::RangeViolation {
                field: "boost.window_secs",
                min: constants::BOOST_WINDOW_MIN_SECS,
                max: constants::BOOST_WINDOW_MAX_SECS,
                value: self.window_secs,
            });
        }
        Ok(())
    }

    pub(crate) fn sanitize(&mut self) {
        if !self.multiplier.is_finite() {
            self.multiplier = Self::default_multiplier();
        }
        self.multiplier = self
            .multiplier
            .clamp(constants::BOOST_MULTIPLIER_MIN, constants::BOOST_MULTIPLIER_MAX);
        if !self.window_secs.is_finite() {
            self.window_secs = Self::default_window_secs();
        }
        self.window_secs = self
            .window_secs
            .clamp(constants::BOOST_WINDOW_MIN_SECS, constants::BOOST_WINDOW_MAX_SECS);
    }
}

impl Default for BoostCfg {
    fn default() -> Self {
        Self {
            multiplier: Self::default_multiplier(),
            window_secs: Self::default_window_secs(),
        }
    }
}
