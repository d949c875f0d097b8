use super::*;
use crate::foundation::core::{Fps, Rgba8Premul};
use crate::render::shape::Block;
use crate::render::surface::{DrawCmd, RecordingSurface};

fn block(x: f64, y: f64, w: f64, h: f64) -> Box<dyn Shape> {
    Box::new(Block::new(
        Geometry::new(x, y, w, h),
        Rgba8Premul::opaque(0, 0, 0),
    ))
}

fn geometry(seq: &ActionSequencer, index: usize) -> Geometry {
    seq.target(index).unwrap().geometry()
}

fn clock() -> FrameClock {
    FrameClock::new(Fps::new(60, 1).unwrap())
}

#[test]
fn empty_sequence_is_terminal_after_one_advance() {
    let mut clock = clock();
    let mut seq = ActionSequencer::new(vec![], vec![], true).unwrap();
    clock.tick(1);
    assert_eq!(seq.advance(&clock), StepStatus::Done);
    assert!(seq.is_terminal());
}

#[test]
fn move_to_lands_on_tenth_advance_without_overshoot() {
    let mut clock = clock();
    let mut seq = ActionSequencer::new(
        vec![Action::new(ActionKind::MoveTo(Axes::X(100.0)), 10)],
        vec![block(0.0, 0.0, 10.0, 10.0)],
        true,
    )
    .unwrap();

    let mut last = 0.0;
    for call in 1..=10 {
        clock.tick(1);
        let status = seq.advance(&clock);
        let x = geometry(&seq, 0).origin.x;
        assert!(x >= last && x <= 100.0, "call {call}: x = {x}");
        last = x;
        if call < 10 {
            assert_eq!(status, StepStatus::Running);
            assert!(x < 100.0);
        } else {
            assert_eq!(status, StepStatus::Done);
        }
    }
    assert_eq!(geometry(&seq, 0).origin.x, 100.0);
    assert_eq!(geometry(&seq, 0).origin.y, 0.0);
}

#[test]
fn relative_scale_resolves_goal_when_action_starts() {
    let mut clock = clock();
    let mut seq = ActionSequencer::new(
        vec![Action::new(ActionKind::Scale(Axes::Both(20.0, -10.0)), 4)],
        vec![block(0.0, 0.0, 10.0, 20.0)],
        true,
    )
    .unwrap();
    for _ in 0..4 {
        clock.tick(1);
        seq.advance(&clock);
    }
    let g = geometry(&seq, 0);
    assert_eq!((g.size.width, g.size.height), (30.0, 10.0));
}

#[test]
fn zero_frame_actions_chain_within_one_tick() {
    let mut clock = clock();
    let mut seq = ActionSequencer::new(
        vec![
            Action::instant(ActionKind::MoveTo(Axes::X(5.0))),
            Action::instant(ActionKind::RadiusTo(4.0)),
            Action::new(ActionKind::ScaleTo(Axes::X(50.0)), 2),
        ],
        vec![block(0.0, 0.0, 10.0, 10.0)],
        true,
    )
    .unwrap();

    clock.tick(1);
    assert_eq!(seq.advance(&clock), StepStatus::Running);
    let g = geometry(&seq, 0);
    assert_eq!(g.origin.x, 5.0);
    assert_eq!(g.corner_radius, 4.0);
    assert_eq!(g.size.width, 30.0);
    assert_eq!(seq.active_action(), 2);

    clock.tick(1);
    assert_eq!(seq.advance(&clock), StepStatus::Done);
    assert_eq!(geometry(&seq, 0).size.width, 50.0);
}

#[test]
fn consecutive_actions_occupy_their_own_windows() {
    let mut clock = clock();
    let mut seq = ActionSequencer::new(
        vec![
            Action::new(ActionKind::Move(Axes::Y(30.0)), 3),
            Action::new(ActionKind::Radius(6.0), 2),
        ],
        vec![block(0.0, 0.0, 10.0, 10.0)],
        false,
    )
    .unwrap();

    let mut statuses = Vec::new();
    for _ in 0..5 {
        clock.tick(1);
        statuses.push(seq.advance(&clock));
    }
    assert_eq!(
        statuses,
        vec![
            StepStatus::Running,
            StepStatus::Running,
            StepStatus::Running,
            StepStatus::Running,
            StepStatus::Done,
        ]
    );
    let g = geometry(&seq, 0);
    assert_eq!(g.origin.y, 30.0);
    assert_eq!(g.corner_radius, 6.0);
}

#[test]
fn retarget_with_trace_copies_size_only() {
    let mut clock = clock();
    let actions = vec![
        Action::instant(ActionKind::Retarget { index: 1 }),
        Action::new(ActionKind::Move(Axes::X(10.0)), 1),
    ];
    let mut seq = ActionSequencer::new(
        actions.clone(),
        vec![block(0.0, 0.0, 30.0, 40.0), block(100.0, 100.0, 5.0, 5.0)],
        true,
    )
    .unwrap();

    clock.tick(1);
    assert_eq!(seq.advance(&clock), StepStatus::Done);
    assert_eq!(seq.active_target(), 1);
    assert_eq!(geometry(&seq, 1), Geometry::new(110.0, 100.0, 30.0, 40.0));
    assert_eq!(geometry(&seq, 0), Geometry::new(0.0, 0.0, 30.0, 40.0));

    let mut untraced = ActionSequencer::new(
        actions,
        vec![block(0.0, 0.0, 30.0, 40.0), block(100.0, 100.0, 5.0, 5.0)],
        false,
    )
    .unwrap();
    untraced.advance(&clock);
    assert_eq!(geometry(&untraced, 1), Geometry::new(110.0, 100.0, 5.0, 5.0));
}

#[test]
fn reset_restores_initial_geometry_and_rewinds() {
    let mut clock = clock();
    let mut seq = ActionSequencer::new(
        vec![
            Action::new(ActionKind::ScaleTo(Axes::Both(80.0, 80.0)), 4),
            Action::instant(ActionKind::Retarget { index: 1 }),
            Action::new(ActionKind::MoveTo(Axes::Y(-50.0)), 4),
        ],
        vec![block(1.0, 2.0, 10.0, 10.0), block(3.0, 4.0, 20.0, 20.0)],
        true,
    )
    .unwrap();

    for _ in 0..6 {
        clock.tick(1);
        seq.advance(&clock);
    }
    assert_eq!(seq.active_target(), 1);
    assert_ne!(geometry(&seq, 1), Geometry::new(3.0, 4.0, 20.0, 20.0));

    seq.target_mut(0)
        .unwrap()
        .set_geometry(Geometry::new(-9.0, -9.0, 1.0, 1.0));
    assert!(seq.target_mut(2).is_none());

    seq.reset();
    assert_eq!(seq.active_action(), 0);
    assert_eq!(seq.active_target(), 0);
    assert_eq!(geometry(&seq, 0), Geometry::new(1.0, 2.0, 10.0, 10.0));
    assert_eq!(geometry(&seq, 1), Geometry::new(3.0, 4.0, 20.0, 20.0));

    for _ in 0..8 {
        clock.tick(1);
        seq.advance(&clock);
    }
    assert!(seq.is_terminal());
    assert_eq!(geometry(&seq, 1), Geometry::new(3.0, -50.0, 80.0, 80.0));
}

#[test]
fn construction_rejects_bad_sequences() {
    let err = ActionSequencer::new(
        vec![Action::instant(ActionKind::Retarget { index: 3 })],
        vec![block(0.0, 0.0, 1.0, 1.0)],
        true,
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("action 0"));

    assert!(
        ActionSequencer::new(
            vec![Action::instant(ActionKind::Radius(1.0))],
            vec![],
            true
        )
        .is_err()
    );
}

#[test]
fn render_draws_active_target() {
    let seq = ActionSequencer::new(vec![], vec![block(0.0, 0.0, 4.0, 4.0)], true).unwrap();
    let mut surface = RecordingSurface::new();
    seq.render(&mut surface).unwrap();
    assert!(matches!(surface.commands(), [DrawCmd::Fill { .. }]));
}
