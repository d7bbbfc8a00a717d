//! Integration tests: full sessions over the terminal scene and rapier world.

use tui_stacker::core::{
    GameOverReason, MotionMode, PlaceOutcome, SessionEvent, StackSession, StackerConfig,
    TickOutcome,
};
use tui_stacker::physics::RapierWorld;
use tui_stacker::term::TermScene;
use tui_stacker::types::{Axis, Phase, PHYSICS_STEP};

type Session = StackSession<TermScene, RapierWorld>;

fn session(config: StackerConfig) -> Session {
    let world = RapierWorld::new(config.gravity);
    let mut s = StackSession::new(config, TermScene::new(), world);
    s.resize(80, 48);
    s
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_off_centre_drop_trims_layer_and_drops_fragment() {
    let mut s = session(StackerConfig::default());
    assert!(s.start());

    // 1.92 s at 5 units/s: x = -10 + 9.6 = -0.4.
    s.tick(1.92);
    assert!(approx(s.top().position.x, -0.4));

    let cut = match s.place() {
        PlaceOutcome::Placed(cut) => cut,
        other => panic!("expected a placement, got {other:?}"),
    };
    assert!(approx(cut.overlap, 2.6));
    assert!(approx(cut.overhang, 0.4));

    let placed = &s.layers()[1];
    assert!(approx(placed.position.x, -0.2));
    assert!(approx(placed.extent.width, 2.6));

    let fragment = s.fragments()[0];
    assert!(approx(fragment.pose.position.x, -1.7));
    assert!(approx(fragment.extent.width, 0.4));

    let next = s.top();
    assert_eq!(next.axis, Axis::Z);
    assert!(approx(next.position.z, -10.0));
    assert!(approx(next.extent.width, 2.6));
    assert!(approx(next.extent.depth, 3.0));
    assert_eq!(s.scene().len(), 4);
    assert_eq!(s.world().len(), 4);
}

#[test]
fn test_fragment_falls_and_scene_follows() {
    let mut s = session(StackerConfig::default());
    s.start();
    s.tick(1.6); // x = -2.0
    assert!(matches!(s.place(), PlaceOutcome::Placed(_)));
    let start_y = s.fragments()[0].pose.position.y;

    for _ in 0..120 {
        assert_eq!(s.tick(PHYSICS_STEP), TickOutcome::Advanced);
    }

    let fragment = s.fragments()[0];
    assert!(fragment.pose.position.y < start_y - 5.0);
    let visual = s.scene().visual(fragment.visual).unwrap();
    assert_eq!(visual.pose, fragment.pose);
}

#[test]
fn test_perfect_stack_keeps_full_size() {
    let config = StackerConfig {
        motion: MotionMode::PerFrame { step: 0.5 },
        ..StackerConfig::default()
    };
    let mut s = session(config);
    s.start();

    for round in 1..=5 {
        for _ in 0..20 {
            s.tick(0.0);
        }
        match s.place() {
            PlaceOutcome::Placed(cut) => {
                assert_eq!(cut.overlap, 3.0);
                assert_eq!(cut.overhang, 0.0);
            }
            other => panic!("round {round}: {other:?}"),
        }
        assert_eq!(s.score(), round);
    }

    assert_eq!(s.layers().len(), 7);
    assert_eq!(s.phase(), Phase::Running);
    // Zero-width fragments still get bodies.
    assert_eq!(s.fragments().len(), 5);

    for _ in 0..10 {
        s.tick(0.0);
    }
    // Climbed to box_height * (layers - 2) + offset.
    assert!(approx(s.camera().height(), 9.0));
}

#[test]
fn test_miss_ends_game_without_changing_stack() {
    let mut s = session(StackerConfig::default());
    s.start();
    s.tick(1.2); // x = -4.0, overlap -1

    assert!(matches!(s.place(), PlaceOutcome::Missed { .. }));
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.score(), 0);
    assert_eq!(s.layers().len(), 2);
    assert!(s.fragments().is_empty());
    assert_eq!(
        s.take_last_event(),
        Some(SessionEvent::GameOver {
            score: 0,
            reason: GameOverReason::Miss
        })
    );

    // Further activations do nothing.
    assert_eq!(s.place(), PlaceOutcome::Ignored);
    assert_eq!(s.layers().len(), 2);
}

#[test]
fn test_drift_ends_game_and_fragments_are_pruned() {
    let mut s = session(StackerConfig::default());
    s.start();
    s.tick(1.6); // x = -2.0
    assert!(matches!(s.place(), PlaceOutcome::Placed(_)));
    s.take_last_event();

    let mut drifted = false;
    for _ in 0..300 {
        if s.tick(PHYSICS_STEP) == TickOutcome::Drifted {
            drifted = true;
        }
    }

    assert!(drifted);
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.score(), 1);
    assert!(matches!(
        s.take_last_event(),
        Some(SessionEvent::GameOver {
            reason: GameOverReason::Drift,
            ..
        })
    ));
    // Five seconds of free fall takes the fragment far below the prune depth.
    assert!(s.fragments().is_empty());
    assert_eq!(s.scene().len(), 3);
    assert_eq!(s.world().len(), 3);
}

#[test]
fn test_status_json_for_summary() {
    let mut s = session(StackerConfig::default());
    s.start();
    s.tick(2.0);
    s.place();

    let json = serde_json::to_value(s.status()).unwrap();
    assert_eq!(json["phase"], "running");
    assert_eq!(json["score"], 1);
    assert_eq!(json["layers"], 3);
    assert_eq!(json["fragments"], 1);
}

#[test]
fn test_restart_is_a_fresh_session() {
    let config = StackerConfig::default();
    let mut s = session(config.clone());
    s.start();
    s.tick(1.2);
    s.place();
    assert_eq!(s.phase(), Phase::GameOver);

    let s = session(config);
    assert_eq!(s.phase(), Phase::NotStarted);
    assert_eq!(s.layers().len(), 1);
    assert_eq!(s.scene().len(), 1);
    assert_eq!(s.world().len(), 1);
}

#[test]
fn test_perfect_drop_fragment_falls_and_is_pruned() {
    let mut s = session(StackerConfig::default());
    s.start();
    s.tick(2.0); // x = 0
    assert!(matches!(s.place(), PlaceOutcome::Placed(_)));
    assert_eq!(s.fragments().len(), 1);
    assert_eq!(s.fragments()[0].extent.width, 0.0);

    for _ in 0..600 {
        s.tick(PHYSICS_STEP);
    }
    assert!(s.fragments().is_empty());
}
