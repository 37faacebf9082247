//! Centralized balance and tuning constants for Quizdash race logic.
//!
//! These values define the deterministic math for the race session.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Session timing -----------------------------------------------------------
pub(crate) const SESSION_DURATION_SECS: u32 = 120;
pub(crate) const SESSION_DURATION_MIN: u32 = 10;
pub(crate) const SESSION_DURATION_MAX: u32 = 600;

// Lanes --------------------------------------------------------------------
pub(crate) const LANE_MAX: u8 = 2;
pub(crate) const LANE_START: u8 = 1;

// Travel rate --------------------------------------------------------------
pub(crate) const BASE_RATE_MPS: f32 = 12.0;
pub(crate) const RATE_MIN_MPS: f32 = 1.0;
pub(crate) const RATE_MAX_MPS: f32 = 60.0;
pub(crate) const FRAME_DT_MAX_SECS: f32 = 1.0;

// Boost tuning -------------------------------------------------------------
pub(crate) const BOOST_MULTIPLIER: f32 = 1.8;
pub(crate) const BOOST_MULTIPLIER_MIN: f32 = 1.0;
pub(crate) const BOOST_MULTIPLIER_MAX: f32 = 4.0;
pub(crate) const BOOST_WINDOW_SECS: f32 = 3.0;
pub(crate) const BOOST_WINDOW_MIN_SECS: f32 = 0.5;
pub(crate) const BOOST_WINDOW_MAX_SECS: f32 = 30.0;

// Question cadence ---------------------------------------------------------
pub(crate) const QUESTION_INTERVAL_M: f32 = 250.0;
pub(crate) const QUESTION_INTERVAL_MIN_M: f32 = 25.0;
pub(crate) const QUESTION_POINTS: u32 = 10;
pub(crate) const QUESTION_POINTS_MAX: u32 = 1_000;
pub(crate) const QUESTION_BANK_SIZE: u32 = 48;
pub(crate) const QUESTION_RECENT_MEMORY: usize = 4;

// Settlement tuning --------------------------------------------------------
pub(crate) const COINS_PER_SCORE: u32 = 10;
pub(crate) const DISTANCE_BONUS_PER_KM: f32 = 0.0;
pub(crate) const COIN_CAP: u32 = 9_999;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f32 = 1e-4;
