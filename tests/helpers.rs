//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::*;

use lap_beam::{DefaultConfig, LapTimer, LapUpdate};

/// Session type used by most integration tests.
pub type TestTimer<'c> = LapTimer<MockSensor, &'c CountingClock, DefaultConfig>;

// ============================================================================
// Session Creation Helpers
// ============================================================================

/// Create a started session reading `CLEAR` unless readings are queued.
pub fn create_test_timer(clock: &CountingClock) -> TestTimer<'_> {
    let mut timer = LapTimer::new(MockSensor::scripted(&[]), clock).unwrap();
    timer.start();
    timer
}

// ============================================================================
// Driving Helpers
// ============================================================================

/// Let `lap_ms` pass and cross the line on the inner lane.
pub fn drive_lap(timer: &mut TestTimer<'_>, clock: &CountingClock, lap_ms: u32) -> LapUpdate {
    clock.advance(lap_ms);
    timer.evaluator_mut().sensor_mut().push(BEAM);
    timer.poll(INNER).unwrap()
}

/// Let `ms` pass without a crossing.
pub fn idle_for(timer: &mut TestTimer<'_>, clock: &CountingClock, ms: u32) -> LapUpdate {
    clock.advance(ms);
    timer.poll(INNER).unwrap()
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert a rendered lap time, with the value in the failure message.
pub fn assert_lap_time(ms: u32, expected: &str) {
    let rendered = lap_beam::format_lap_time(ms);
    assert_eq!(
        rendered.as_str(),
        expected,
        "format_lap_time({}) rendered {:?}",
        ms,
        rendered
    );
}
