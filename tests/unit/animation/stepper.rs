use super::*;
use crate::foundation::core::Fps;

fn clock(fps: u32) -> FrameClock {
    FrameClock::new(Fps::new(fps, 1).unwrap())
}

fn stepper(low: f64, high: f64, secs: f64) -> ValueStepper {
    ValueStepper::new(StepperOpts {
        bounds: ValueRange::new(0.0, 100.0),
        initial: Some(ValueRange::new(low, high)),
        time_to_use_secs: secs,
    })
    .unwrap()
}

fn run_to_rest(s: &mut ValueStepper, clock: &mut FrameClock) -> usize {
    let mut steps = 0;
    loop {
        clock.tick(1);
        steps += 1;
        if s.step(clock) == StepStatus::Done {
            return steps;
        }
        assert!(steps < 10_000, "stepper never settled");
    }
}

#[test]
fn instant_set_lands_within_the_call() {
    let clock = clock(60);
    let mut s = stepper(0.0, 10.0, 1.0);
    assert_eq!(s.time_to_use_secs(), 1.0);
    let out = s
        .set_target(&clock, 42.0, TargetMode::instant(Edge::High))
        .unwrap();
    assert_eq!(out, TargetOutcome::Committed);
    assert_eq!(s.value(), 42.0);
    assert!(!s.is_moving());
}

#[test]
fn animated_move_needs_ceil_duration_steps_and_lands_exactly() {
    // 0.25 s at 10 fps = 2.5 frames -> 3 steps.
    let mut clock = clock(10);
    let mut s = stepper(0.0, 10.0, 0.25);
    assert_eq!(
        s.set_target(&clock, 60.0, TargetMode::default()).unwrap(),
        TargetOutcome::Animating
    );

    let mut last = s.value();
    for _ in 0..2 {
        clock.tick(1);
        assert_eq!(s.step(&clock), StepStatus::Running);
        assert!(s.value() > last && s.value() < 60.0);
        last = s.value();
    }
    clock.tick(1);
    assert_eq!(s.step(&clock), StepStatus::Done);
    assert_eq!(s.value(), 60.0);
    assert!(!s.is_moving());
}

#[test]
fn whole_frame_duration_takes_exactly_that_many_steps() {
    let mut clock = clock(60);
    let mut s = stepper(0.0, 0.0, 0.5);
    s.set_target(&clock, 90.0, TargetMode::default()).unwrap();
    assert_eq!(run_to_rest(&mut s, &mut clock), 30);
    assert_eq!(s.value(), 90.0);
}

#[test]
fn zero_duration_lands_on_first_step() {
    let mut clock = clock(60);
    let mut s = stepper(0.0, 0.0, 0.0);
    s.set_target(&clock, 25.0, TargetMode::default()).unwrap();
    assert_eq!(run_to_rest(&mut s, &mut clock), 1);
    assert_eq!(s.value(), 25.0);
}

#[test]
fn second_target_replaces_first() {
    let mut clock = clock(60);
    let mut s = stepper(0.0, 0.0, 0.5);
    s.set_target(&clock, 80.0, TargetMode::default()).unwrap();
    clock.tick(1);
    s.step(&clock);
    s.set_target(&clock, 30.0, TargetMode::default()).unwrap();
    run_to_rest(&mut s, &mut clock);
    assert_eq!(s.value(), 30.0);
}

#[test]
fn retarget_keeps_travelled_distance() {
    let mut clock = clock(10);
    let mut s = stepper(0.0, 0.0, 1.0);
    s.set_target(&clock, 100.0, TargetMode::default()).unwrap();
    for _ in 0..5 {
        clock.tick(1);
        s.step(&clock);
    }
    assert_eq!(s.value(), 50.0);
    s.set_target(&clock, 60.0, TargetMode::default()).unwrap();
    clock.tick(1);
    s.step(&clock);
    assert!(s.value() > 50.0 && s.value() < 60.0);
}

#[test]
fn modify_target_composes_against_pending_goal() {
    let clock = clock(60);
    let mut s = stepper(0.0, 50.0, 1.0);
    s.modify_target(&clock, 10.0, TargetMode::default()).unwrap();
    s.modify_target(&clock, 10.0, TargetMode::default()).unwrap();
    let (target, moving) = s.target_range();
    assert!(moving);
    assert_eq!(target.high, 70.0);
    assert_eq!(s.value(), 50.0);
}

#[test]
fn percentage_helpers_scale_by_upper_bound() {
    let clock = clock(60);
    let mut s = ValueStepper::new(StepperOpts {
        bounds: ValueRange::new(0.0, 200.0),
        initial: Some(ValueRange::new(0.0, 0.0)),
        time_to_use_secs: 1.0,
    })
    .unwrap();
    s.set_percentage(&clock, 25.0, TargetMode::instant(Edge::High))
        .unwrap();
    assert_eq!(s.value(), 50.0);
    s.modify_percentage(&clock, 10.0, TargetMode::instant(Edge::High))
        .unwrap();
    assert_eq!(s.value(), 70.0);
}

#[test]
fn out_of_bounds_targets_are_clamped() {
    let mut clock = clock(60);
    let mut s = stepper(0.0, 50.0, 0.1);
    s.set_target(&clock, 150.0, TargetMode::default()).unwrap();
    run_to_rest(&mut s, &mut clock);
    assert_eq!(s.value(), 100.0);

    s.set_target(&clock, -20.0, TargetMode::instant(Edge::Low))
        .unwrap();
    assert_eq!(s.current().low, 0.0);
}

#[test]
fn requests_matching_committed_or_pending_are_noops() {
    let clock = clock(60);
    let mut s = stepper(0.0, 100.0, 1.0);
    assert_eq!(
        s.set_target(&clock, 100.0, TargetMode::default()).unwrap(),
        TargetOutcome::Unchanged
    );
    assert_eq!(
        s.set_target(&clock, 400.0, TargetMode::default()).unwrap(),
        TargetOutcome::Unchanged
    );
    assert!(!s.is_moving());

    s.set_target(&clock, 40.0, TargetMode::default()).unwrap();
    assert_eq!(
        s.set_target(&clock, 40.0, TargetMode::default()).unwrap(),
        TargetOutcome::Unchanged
    );
}

#[test]
fn degenerate_bounds_make_every_target_a_noop() {
    let clock = clock(60);
    let mut s = ValueStepper::new(StepperOpts {
        bounds: ValueRange::new(5.0, 5.0),
        initial: None,
        time_to_use_secs: 1.0,
    })
    .unwrap();
    for edge in [Edge::Low, Edge::High] {
        for v in [-10.0, 5.0, 99.0] {
            assert_eq!(
                s.set_target(&clock, v, TargetMode::animated(edge)).unwrap(),
                TargetOutcome::Unchanged
            );
        }
    }
    assert_eq!(s.current(), ValueRange::new(5.0, 5.0));
}

#[test]
fn bottom_edge_cannot_pass_top_edge() {
    let mut clock = clock(60);
    let mut s = stepper(0.0, 40.0, 0.2);
    s.set_target(&clock, 90.0, TargetMode::instant(Edge::Low))
        .unwrap();
    assert_eq!(s.current(), ValueRange::new(40.0, 40.0));

    let mut s = stepper(10.0, 40.0, 0.2);
    s.set_target(&clock, 5.0, TargetMode::animated(Edge::High))
        .unwrap();
    run_to_rest(&mut s, &mut clock);
    assert_eq!(s.current(), ValueRange::new(10.0, 10.0));
}

#[test]
fn edges_move_independently() {
    let mut clock = clock(10);
    let mut s = stepper(20.0, 60.0, 0.5);
    s.set_target(&clock, 0.0, TargetMode::animated(Edge::Low))
        .unwrap();
    clock.tick(2);
    s.step(&clock);
    s.set_target(&clock, 90.0, TargetMode::animated(Edge::High))
        .unwrap();
    assert!(s.current().low < 20.0);
    assert_eq!(s.current().high, 60.0);
    run_to_rest(&mut s, &mut clock);
    assert_eq!(s.current(), ValueRange::new(0.0, 90.0));
}

#[test]
fn invariant_holds_under_mixed_requests() {
    let mut clock = clock(30);
    let mut s = stepper(30.0, 70.0, 0.3);
    let mut seed = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    for _ in 0..500 {
        let r = next();
        let edge = if r & 1 == 0 { Edge::Low } else { Edge::High };
        let value = (r >> 8) as f64 % 160.0 - 30.0;
        let mode = TargetMode {
            instant: r & 0b110 == 0,
            edge,
        };
        if r & 0b1000 == 0 {
            s.set_target(&clock, value, mode).unwrap();
        } else {
            s.modify_target(&clock, value / 4.0, mode).unwrap();
        }

        for _ in 0..(r >> 40) % 4 {
            clock.tick(1);
            s.step(&clock);
            let c = s.current();
            assert!(0.0 <= c.low && c.low <= c.high && c.high <= 100.0, "{c:?}");
        }
    }
}

#[test]
fn non_finite_input_is_rejected() {
    let clock = clock(60);
    let mut s = stepper(0.0, 10.0, 1.0);
    assert!(
        s.set_target(&clock, f64::NAN, TargetMode::default())
            .is_err()
    );
    assert!(
        s.modify_target(&clock, f64::INFINITY, TargetMode::default())
            .is_err()
    );
    assert!(
        ValueStepper::new(StepperOpts {
            bounds: ValueRange::new(10.0, 0.0),
            ..StepperOpts::default()
        })
        .is_err()
    );
}

#[test]
fn fill_span_maps_range_onto_track() {
    let s = stepper(25.0, 75.0, 1.0);
    assert_eq!(s.fill_span(200.0), (50.0, 100.0));
}

#[test]
fn cancel_freezes_in_place() {
    let mut clock = clock(10);
    let mut s = stepper(0.0, 0.0, 1.0);
    s.set_target(&clock, 100.0, TargetMode::default()).unwrap();
    clock.tick(5);
    s.step(&clock);
    s.cancel();
    assert!(!s.is_moving());
    assert_eq!(s.value(), 50.0);
}
