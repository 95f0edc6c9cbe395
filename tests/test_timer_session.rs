//! Lap timer sessions driven like a main loop.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use helpers::*;
use lap_beam::config::{MinimalConfig, TimerConfig};
use lap_beam::{
    DefaultConfig, LapError, LapOutcome, LapTimer, ManualClock, StartMode, TimerState,
    render_status,
};

// ============================================================================
// Race Flow
// ============================================================================

#[test]
fn test_race_of_five_laps() {
    let clock = CountingClock::new(0);
    let mut timer = create_test_timer(&clock);

    let laps = [6_200, 5_900, 6_050, 5_870, 6_400];
    let mut outcomes = Vec::new();
    for lap in laps {
        idle_for(&mut timer, &clock, 100);
        outcomes.push(drive_lap(&mut timer, &clock, lap - 100).outcome);
    }

    assert_eq!(
        outcomes,
        [
            LapOutcome::NewBest,
            LapOutcome::NewBest,
            LapOutcome::LapCompleted,
            LapOutcome::NewBest,
            LapOutcome::LapCompleted,
        ]
    );
    assert_eq!(timer.lap_count(), 5);
    assert_eq!(timer.best_lap(), Some(5_870));
}

#[test]
fn test_current_lap_ticks_between_crossings() {
    let clock = CountingClock::new(2_000);
    let mut timer = create_test_timer(&clock);

    idle_for(&mut timer, &clock, 750);
    assert_eq!(timer.times().current_lap, 750);

    drive_lap(&mut timer, &clock, 250);
    idle_for(&mut timer, &clock, 300);
    assert_eq!(timer.times().current_lap, 300);
    assert_eq!(timer.times().previous_lap, 3_000);
}

#[test]
#[cfg(feature = "history")]
fn test_history_and_average() {
    let clock = CountingClock::new(0);
    let mut timer = create_test_timer(&clock);

    for lap in [4_000, 5_000, 6_000] {
        drive_lap(&mut timer, &clock, lap);
    }

    let history: Vec<u32> = timer.history().iter().collect();
    assert_eq!(history, [4_000, 5_000, 6_000]);
    assert_eq!(timer.history().average(), Some(5_000));
    assert_eq!(timer.history().fastest(), timer.best_lap());
}

#[test]
#[cfg(feature = "history")]
fn test_minimal_config_history_size() {
    let clock = ManualClock::new(0);
    let mut timer: LapTimer<_, _, MinimalConfig, { MinimalConfig::HISTORY_SIZE }> =
        LapTimer::new(MockSensor::scripted(&[]), &clock).unwrap();
    timer.start();

    for _ in 0..6 {
        clock.advance(3_000);
        timer.evaluator_mut().sensor_mut().push(BEAM);
        timer.poll(INNER).unwrap();
    }

    assert_eq!(timer.lap_count(), 6);
    assert_eq!(timer.history().len(), MinimalConfig::HISTORY_SIZE);
}

#[test]
fn test_laps_match_marks_with_free_running_clock() {
    let clock = TickingClock::new(0, 1);
    let mut timer: LapTimer<MockSensor, &TickingClock, DefaultConfig> =
        LapTimer::new(MockSensor::scripted(&[]), &clock).unwrap();
    timer.start();
    let first_mark = timer.times().previous_lap;

    let mut total = 0;
    for _ in 0..5 {
        let mark = timer.times().previous_lap;
        for _ in 0..50 {
            timer.poll(INNER).unwrap();
        }
        timer.evaluator_mut().sensor_mut().push(BEAM);
        let update = timer.poll(INNER).unwrap();
        assert!(update.outcome.is_trigger());

        let lap = timer.history().last().unwrap_or(update.times.current_lap);
        assert_eq!(lap, update.times.current_lap);
        assert_eq!(lap, timer.times().previous_lap - mark);
        total += lap;
    }

    assert_eq!(timer.lap_count(), 5);
    assert_eq!(total, timer.times().previous_lap - first_mark);
}

// ============================================================================
// Start Modes & Guards
// ============================================================================

#[test]
fn test_flying_start() {
    let clock = CountingClock::new(0);
    let mut timer: TestTimer<'_> = LapTimer::new(MockSensor::scripted(&[]), &clock)
        .unwrap()
        .start_mode(StartMode::Flying);
    timer.start();
    assert_eq!(timer.state(), TimerState::Armed);

    // Warm-up run to the line does not count
    let update = drive_lap(&mut timer, &clock, 15_000);
    assert_eq!(update.outcome, LapOutcome::Idle);
    assert_eq!(timer.state(), TimerState::Running);
    assert_eq!(timer.best_lap(), None);

    drive_lap(&mut timer, &clock, 6_000);
    assert_eq!(timer.lap_count(), 1);
    assert_eq!(timer.best_lap(), Some(6_000));
}

#[test]
fn test_min_lap_filters_beam_dwell() {
    let clock = CountingClock::new(0);
    let mut timer: TestTimer<'_> = LapTimer::new(MockSensor::scripted(&[]), &clock)
        .unwrap()
        .min_lap(2_000);
    timer.start();

    drive_lap(&mut timer, &clock, 6_000);
    // Car still breaking the beam for three more samples
    for _ in 0..3 {
        let update = drive_lap(&mut timer, &clock, 10);
        assert_eq!(update.outcome, LapOutcome::Idle);
    }

    assert_eq!(timer.lap_count(), 1);
    assert_eq!(timer.best_lap(), Some(6_000));
}

#[test]
fn test_without_min_lap_every_sample_counts() {
    let clock = CountingClock::new(0);
    let mut timer = create_test_timer(&clock);

    drive_lap(&mut timer, &clock, 6_000);
    drive_lap(&mut timer, &clock, 10);

    assert_eq!(timer.lap_count(), 2);
    assert_eq!(timer.best_lap(), Some(10));
}

// ============================================================================
// Errors & Lifecycle
// ============================================================================

#[test]
fn test_not_running_until_started() {
    let clock = CountingClock::new(0);
    let mut timer: TestTimer<'_> = LapTimer::new(MockSensor::constant(BEAM), &clock).unwrap();

    assert_eq!(timer.poll(INNER), Err(LapError::NotRunning));
    assert!(timer.evaluator().sensor().reads().is_empty());

    timer.start();
    assert!(timer.poll(INNER).is_ok());

    timer.stop();
    assert_eq!(timer.state(), TimerState::Stopped);
    assert_eq!(timer.poll(INNER), Err(LapError::NotRunning));
}

#[test]
fn test_errors_do_not_count_laps() {
    let clock = CountingClock::new(0);
    let mut timer: TestTimer<'_> = LapTimer::new(MockSensor::failing(), &clock).unwrap();
    timer.start();

    clock.advance(5_000);
    assert_eq!(timer.poll(INNER), Err(LapError::SensorRead));
    assert_eq!(timer.poll(UNWIRED), Err(LapError::InvalidChannel(UNWIRED)));
    assert_eq!(timer.lap_count(), 0);
    assert_eq!(timer.best_lap(), None);
}

#[test]
fn test_two_lanes_share_one_clock() {
    let clock = CountingClock::new(0);
    let mut inner = create_test_timer(&clock);
    let mut outer: TestTimer<'_> = LapTimer::new(MockSensor::scripted(&[]), &clock).unwrap();
    outer.start();

    clock.advance(5_500);
    inner.evaluator_mut().sensor_mut().push(BEAM);
    inner.poll(INNER).unwrap();
    outer.poll(OUTER).unwrap();

    clock.advance(400);
    inner.poll(INNER).unwrap();
    outer.evaluator_mut().sensor_mut().push(BEAM);
    outer.poll(OUTER).unwrap();

    assert_eq!(inner.best_lap(), Some(5_500));
    assert_eq!(outer.best_lap(), Some(5_900));

    let line = render_status::<{ DefaultConfig::LINE_WIDTH }>("P2", outer.times()).unwrap();
    assert_eq!(line.as_str(), "P2 0:05:90 B0:05:90 ");
}
