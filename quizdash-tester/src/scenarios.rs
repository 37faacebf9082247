//! Scenario registry for headless engine sweeps.
use anyhow::{Result, bail};
use serde::Serialize;

use quizdash_game::{
    EndReason, QuestionCfg, RaceSession, SessionCfg, SessionStatus, WrongAnswerPolicy,
};

use crate::driver::{InputDriver, check_step};

/// Outcome of one scenario iteration.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: &'static str,
    pub seed: u64,
    pub passed: bool,
    pub details: String,
}

/// All registered scenarios with their one-line descriptions.
#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("idle-timeout", "no input; countdown must expire cleanly"),
        ("random-sweep", "chaotic player; invariants checked every step"),
        ("quiz-ace", "every answer correct; reward must match the rule"),
        ("sudden-death", "end-run policy; first wrong answer collides"),
        ("rage-quit", "mid-run close; settlement still coherent"),
    ]
}

/// Run one iteration of `name` with `seed`.
///
/// # Errors
///
/// Returns an error for unknown scenario names.
pub fn run_scenario(name: &str, seed: u64) -> Result<ScenarioOutcome> {
    match name {
        "idle-timeout" => Ok(idle_timeout(seed)),
        "random-sweep" => Ok(random_sweep(seed)),
        "quiz-ace" => Ok(quiz_ace(seed)),
        "sudden-death" => Ok(sudden_death(seed)),
        "rage-quit" => Ok(rage_quit(seed)),
        other => bail!("unknown scenario '{other}' (try --list-scenarios)"),
    }
}

fn outcome(
    scenario: &'static str,
    seed: u64,
    passed: bool,
    details: impl Into<String>,
) -> ScenarioOutcome {
    ScenarioOutcome {
        scenario,
        seed,
        passed,
        details: details.into(),
    }
}

fn idle_timeout(seed: u64) -> ScenarioOutcome {
    let mut run = RaceSession::new(SessionCfg::default(), seed).expect("default config is valid");
    let duration = run.controller().config().duration_secs;
    for _ in 0..duration {
        run.tick_second();
    }
    let state = run.state();
    let passed = state.status == SessionStatus::Ended
        && state.end_reason == Some(EndReason::TimeExpired)
        && state.time_left == 0
        && state.score == 0;
    outcome(
        "idle-timeout",
        seed,
        passed,
        format!("reason={:?} time_left={}", state.end_reason, state.time_left),
    )
}

fn random_sweep(seed: u64) -> ScenarioOutcome {
    let mut run = RaceSession::new(SessionCfg::default(), seed).expect("default config is valid");
    let mut driver = InputDriver::new(seed ^ 0xD1CE, 0.7);
    let mut prev = run.snapshot();
    for step in 0..5_000 {
        driver.step(&mut run);
        let next = run.snapshot();
        if let Some(violation) = check_step(step, &prev, &next) {
            log::debug!("random-sweep seed={seed}: {violation}");
            return outcome("random-sweep", seed, false, violation.to_string());
        }
        prev = next;
    }
    outcome(
        "random-sweep",
        seed,
        true,
        format!(
            "distance={:.0}m score={} status={:?}",
            prev.distance, prev.score, prev.status
        ),
    )
}

fn quiz_ace(seed: u64) -> ScenarioOutcome {
    let mut run = RaceSession::new(SessionCfg::default(), seed).expect("default config is valid");
    let mut answered = 0u32;
    let mut frame = 0u64;
    while run.state().is_running() {
        if run.tick_frame(1.0 / 60.0).is_some() {
            run.resolve_question(true);
            answered += 1;
        }
        frame += 1;
        // One countdown second per 60 frames.
        if frame % 60 == 0 {
            run.tick_second();
        }
    }
    let Ok(result) = run.settle() else {
        return outcome("quiz-ace", seed, false, "terminal run refused settlement");
    };
    let passed = result.score == answered * 10 && result.coins_earned == answered;
    outcome(
        "quiz-ace",
        seed,
        passed,
        format!(
            "answered={answered} score={} coins={}",
            result.score, result.coins_earned
        ),
    )
}

fn sudden_death(seed: u64) -> ScenarioOutcome {
    let cfg = SessionCfg {
        question: QuestionCfg {
            wrong_answer: WrongAnswerPolicy::EndRun,
            ..QuestionCfg::default()
        },
        ..SessionCfg::default()
    };
    let mut run = RaceSession::new(cfg, seed).expect("config is valid");
    let mut fired = false;
    for _ in 0..100_000 {
        if run.tick_frame(1.0 / 60.0).is_some() {
            run.resolve_question(false);
            fired = true;
            break;
        }
    }
    let state = run.state();
    let passed = fired && state.end_reason == Some(EndReason::Collision) && state.score == 0;
    outcome(
        "sudden-death",
        seed,
        passed,
        format!("fired={fired} reason={:?}", state.end_reason),
    )
}

fn rage_quit(seed: u64) -> ScenarioOutcome {
    let mut run = RaceSession::new(SessionCfg::default(), seed).expect("default config is valid");
    let mut driver = InputDriver::new(seed.wrapping_mul(31), 0.5);
    for _ in 0..300 {
        if !run.state().is_running() {
            break;
        }
        driver.step(&mut run);
    }
    let pre_close = run.snapshot();
    run.close();
    let state = run.state();
    let closed_in_time = pre_close.status == SessionStatus::Running;
    let reason_ok = if closed_in_time {
        state.end_reason == Some(EndReason::PlayerClosed)
    } else {
        state.end_reason.is_some()
    };
    let Ok(result) = run.settle() else {
        return outcome("rage-quit", seed, false, "terminal run refused settlement");
    };
    let passed = reason_ok
        && result.score == state.score
        && (result.distance - state.distance).abs() < f32::EPSILON;
    outcome(
        "rage-quit",
        seed,
        passed,
        format!("reason={:?} coins={}", state.end_reason, result.coins_earned),
    )
}
