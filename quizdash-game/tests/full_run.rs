//! End-to-end scenarios walking a session from start to settlement.
use quizdash_game::{
    EndReason, LaneShift, QuestionCfg, RaceSession, SessionCfg, SessionStatus, SettlementCfg,
    WrongAnswerPolicy,
};

fn session(cfg: SessionCfg, seed: u64) -> RaceSession {
    RaceSession::new(cfg, seed).expect("valid config")
}

#[test]
fn untouched_session_times_out_after_full_countdown() {
    let mut run = session(SessionCfg::default(), 1337);
    for tick in 0..120 {
        assert!(
            run.state().is_running() || tick == 119,
            "session ended early at tick {tick}"
        );
        run.tick_second();
    }
    assert_eq!(run.state().status, SessionStatus::Ended);
    assert_eq!(run.state().end_reason, Some(EndReason::TimeExpired));
    assert_eq!(run.state().time_left, 0);
}

#[test]
fn played_session_settles_with_expected_coins() {
    let mut run = session(SessionCfg::default(), 42);

    // Drive for a minute at 60 fps, answering every prompt correctly and
    // weaving between lanes.
    let mut prompts = 0;
    for frame in 0..3_600 {
        if let Some(_prompt) = run.tick_frame(1.0 / 60.0) {
            prompts += 1;
            run.resolve_question(true);
        }
        if frame % 60 == 0 {
            run.tick_second();
            let shift = if frame % 120 == 0 {
                LaneShift::Left
            } else {
                LaneShift::Right
            };
            run.change_lane(shift);
        }
    }
    assert!(prompts >= 2, "a minute of travel should raise prompts");
    assert_eq!(run.state().questions_correct, prompts);

    run.close();
    let result = run.settle().expect("ended session settles");
    assert_eq!(result.score, prompts * 10);
    assert_eq!(result.coins_earned, result.score / 10);
}

#[test]
fn collision_ends_run_under_end_run_policy() {
    let cfg = SessionCfg {
        question: QuestionCfg {
            wrong_answer: WrongAnswerPolicy::EndRun,
            ..QuestionCfg::default()
        },
        ..SessionCfg::default()
    };
    let mut run = session(cfg, 9);

    // Travel until the first prompt, then flub it.
    let mut prompt = None;
    for _ in 0..10_000 {
        prompt = run.tick_frame(1.0 / 60.0);
        if prompt.is_some() {
            break;
        }
    }
    assert!(prompt.is_some(), "prompt should fire before exhaustion");
    run.resolve_question(false);

    assert_eq!(run.state().end_reason, Some(EndReason::Collision));
    let result = run.settle().expect("collision still settles");
    assert_eq!(result.coins_earned, 0);
    assert!(result.distance > 0.0, "distance survives into settlement");
}

#[test]
fn boost_window_spans_frames_until_reset_arrives() {
    let mut run = session(SessionCfg::default(), 5);
    let handle = run.press_boost().expect("first press opens the window");

    let _ = run.tick_frame(0.5);
    let boosted = run.state().distance;
    run.boost_elapsed(handle);
    let _ = run.tick_frame(0.5);
    let total = run.state().distance;

    // Same dt, but the second half-second is unboosted.
    assert!(boosted > total - boosted, "boosted half must out-travel plain half");
    assert!(!run.state().boost_active);
}

#[test]
fn identical_seeds_replay_identical_question_order() {
    let drive = |seed: u64| -> Vec<u32> {
        let mut run = session(SessionCfg::default(), seed);
        let mut ids = Vec::new();
        for _ in 0..7_200 {
            if let Some(prompt) = run.tick_frame(1.0 / 60.0) {
                ids.push(prompt.question_id);
                run.resolve_question(true);
            }
        }
        ids
    };
    assert_eq!(drive(2024), drive(2024));
    assert_ne!(drive(2024), drive(2025), "different seeds should diverge");
}

#[test]
fn custom_settlement_rule_applies() {
    let cfg = SessionCfg {
        settlement: SettlementCfg {
            coins_per_score: 5,
            ..SettlementCfg::default()
        },
        ..SessionCfg::default()
    };
    let mut run = session(cfg, 3);
    for _ in 0..3 {
        run.resolve_question(true);
    }
    run.close();
    let result = run.settle().expect("ended");
    assert_eq!(result.score, 30);
    assert_eq!(result.coins_earned, 6);
}
