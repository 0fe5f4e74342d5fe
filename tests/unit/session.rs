use super::*;
use crate::hero::controller::{FinishedBy, HeroEffect};
use crate::reveal::engine::RevealChange;

fn scenario(json: &str) -> Scenario {
    Scenario::from_reader(json.as_bytes()).unwrap()
}

const ROTATE: &str = r#"{
    "end_ms": 4000,
    "steps": [
        { "at_ms": 0, "do": "document_ready" },
        { "at_ms": 100, "do": "probe_loaded", "index": 0 },
        { "at_ms": 120, "do": "probe_failed", "index": 3, "reason": "404" },
        { "at_ms": 150, "do": "probe_loaded", "index": 1 },
        { "at_ms": 500, "do": "splash_done" },
        { "at_ms": 1000, "do": "click" }
    ]
}"#;

#[test]
fn replays_rotation_to_completion() {
    let trace = run(&LandingConfig::default(), &scenario(ROTATE)).unwrap();
    let effects: Vec<_> = trace.effects().cloned().collect();
    assert!(effects.contains(&PageEffect::Hero(HeroEffect::LoadingCleared)));
    assert!(effects.contains(&PageEffect::Hero(HeroEffect::TransitionStarted {
        current: 0,
        next: 1
    })));
    assert!(effects.contains(&PageEffect::Hero(HeroEffect::TransitionFinished {
        cursor: 1,
        via: FinishedBy::Animator
    })));

    let last = trace.last().unwrap();
    assert_eq!(last.cause, TraceCause::Frame);
    assert_eq!(last.at_ms, Millis(3008));
    assert_eq!(last.cursor, 1);
    assert_eq!(last.state, HeroState::Idle);
    assert!(!last.locked);
    assert!(!last.loading);
    assert_eq!(last.settled, 3);
}

#[test]
fn stalled_renderer_unlocks_through_fallback() {
    let mut sc = scenario(ROTATE);
    sc.frame_interval_ms = None;
    let trace = run(&LandingConfig::default(), &sc).unwrap();
    let last = trace.last().unwrap();
    assert_eq!(last.cause, TraceCause::Timer);
    assert_eq!(last.at_ms, Millis(3500));
    assert_eq!(
        last.effects[0],
        PageEffect::Hero(HeroEffect::TransitionFinished {
            cursor: 1,
            via: FinishedBy::Fallback
        })
    );
    assert!(!last.locked);
}

#[test]
fn clicks_during_transition_are_ignored() {
    let mut sc = scenario(ROTATE);
    sc.steps.push(Step {
        at_ms: Millis(1500),
        action: StepAction::Click,
    });
    let trace = run(&LandingConfig::default(), &sc).unwrap();
    let finished = trace
        .effects()
        .filter(|e| matches!(e, PageEffect::Hero(HeroEffect::TransitionFinished { .. })))
        .count();
    assert_eq!(finished, 1);
    assert_eq!(trace.last().unwrap().cursor, 1);
}

#[test]
fn scroll_reveals_sections_after_splash() {
    let sc = scenario(
        r#"{
            "sections": [{ "id": "about", "top": 800, "height": 800 }],
            "steps": [
                { "at_ms": 0, "do": "scroll", "y": 400 },
                { "at_ms": 10, "do": "splash_done" },
                { "at_ms": 20, "do": "scroll", "y": 400 }
            ]
        }"#,
    );
    let trace = run(&LandingConfig::default(), &sc).unwrap();
    assert!(trace.records[0].effects.is_empty());
    assert!(trace.records[0].scroll_locked);
    assert_eq!(trace.records[1].effects, vec![PageEffect::ScrollUnlocked]);
    assert_eq!(
        trace.records[2].effects,
        vec![PageEffect::Reveal(RevealChange::Revealed("about".into()))]
    );
    assert_eq!(trace.records[2].revealed, vec!["about".to_string()]);
}

#[test]
fn unmount_mid_transition_stops_everything() {
    let mut sc = scenario(ROTATE);
    sc.steps.push(Step {
        at_ms: Millis(1500),
        action: StepAction::Unmount,
    });
    let trace = run(&LandingConfig::default(), &sc).unwrap();
    assert!(
        !trace
            .effects()
            .any(|e| matches!(e, PageEffect::Hero(HeroEffect::TransitionFinished { .. })))
    );
    let last = trace.last().unwrap();
    assert_eq!(last.cause, TraceCause::Step(StepAction::Unmount));
    assert!(!last.scroll_locked);
}

#[test]
fn splash_after_unmount_is_inert() {
    let sc = scenario(
        r#"{
            "sections": [{ "id": "about", "top": 800, "height": 800 }],
            "steps": [
                { "at_ms": 0, "do": "unmount" },
                { "at_ms": 10, "do": "splash_done" },
                { "at_ms": 20, "do": "scroll", "y": 900 }
            ]
        }"#,
    );
    let trace = run(&LandingConfig::default(), &sc).unwrap();
    assert_eq!(trace.effects().count(), 0);
    assert!(trace.last().unwrap().revealed.is_empty());
}

#[test]
fn out_of_order_steps_are_rejected() {
    let sc = scenario(
        r#"{ "steps": [
            { "at_ms": 50, "do": "click" },
            { "at_ms": 10, "do": "click" }
        ] }"#,
    );
    let err = run(&LandingConfig::default(), &sc).unwrap_err();
    assert!(matches!(err, HeroError::Config(_)));
}

#[test]
fn unknown_step_kind_fails_to_parse() {
    let err = Scenario::from_reader(r#"{ "steps": [{ "at_ms": 0, "do": "jump" }] }"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, HeroError::Serde(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = Scenario::from_path("/nonexistent/scenario.json").unwrap_err();
    assert!(matches!(err, HeroError::Config(_)));
}

#[test]
fn frame_grid_stops_at_the_end_of_time() {
    let sc = Scenario {
        end_ms: Some(Millis(u64::MAX)),
        steps: vec![Step {
            at_ms: Millis(u64::MAX - 100),
            action: StepAction::Click,
        }],
        ..scenario(r#"{ "steps": [] }"#)
    };
    let trace = run(&LandingConfig::default(), &sc).unwrap();
    let last = trace.last().unwrap();
    assert_eq!(last.cause, TraceCause::Timer);
    assert_eq!(last.at_ms, Millis(u64::MAX));
    assert_eq!(
        last.effects[0],
        PageEffect::Hero(HeroEffect::TransitionFinished {
            cursor: 1,
            via: FinishedBy::Fallback
        })
    );
}
