//! Test fixtures and utilities for lap-beam testing.
//!
//! Provides:
//! - `MockChannel`: Two-lane channel set (derived with the macro)
//! - `MockSensor`: Scripted Sensor implementation with read log
//! - `CountingClock`: Clock that records how often it was read
//! - `TickingClock`: Clock that advances on every read
//! - Reading constants for beam / no beam

#![allow(dead_code)]

use lap_beam::{Clock, Sensor, SensorChannel, SensorReading};
use std::cell::Cell;
use std::collections::VecDeque;

/// Reading inside the default trigger band (100 < v < 200).
pub const BEAM: SensorReading = 150;

/// Reading outside the default trigger band (beam unbroken).
pub const CLEAR: SensorReading = 5000;

// ============================================================================
// MockChannel - Configured Sensor Set
// ============================================================================

/// Two beam sensors on analog pins 1 and 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq, SensorChannel)]
pub enum MockChannel {
    Inner = 1,
    Outer = 2,
}

// ============================================================================
// MockSensor - Test Sensor Implementation
// ============================================================================

/// Mock sensor for testing.
///
/// Returns scripted readings in order, then repeats `idle` once the script
/// runs out. Every read is logged with its channel.
#[derive(Debug)]
pub struct MockSensor {
    /// Scripted readings
    script: VecDeque<SensorReading>,

    /// Reading once the script is exhausted
    idle: SensorReading,

    /// Channels read so far
    reads: Vec<MockChannel>,

    /// Fail every read when set
    failing: bool,
}

impl MockSensor {
    /// Sensor that always reads `value`.
    pub fn constant(value: SensorReading) -> Self {
        Self {
            script: VecDeque::new(),
            idle: value,
            reads: Vec::new(),
            failing: false,
        }
    }

    /// Sensor replaying `readings`, then reading `CLEAR`.
    pub fn scripted(readings: &[SensorReading]) -> Self {
        Self {
            script: readings.iter().copied().collect(),
            idle: CLEAR,
            reads: Vec::new(),
            failing: false,
        }
    }

    /// Sensor whose reads always fail.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::constant(CLEAR)
        }
    }

    /// Queue more readings.
    pub fn push(&mut self, reading: SensorReading) {
        self.script.push_back(reading);
    }

    /// Channels read so far.
    pub fn reads(&self) -> &[MockChannel] {
        &self.reads
    }
}

impl Sensor for MockSensor {
    type Channel = MockChannel;
    type Error = ();

    fn read(&mut self, channel: MockChannel) -> Result<SensorReading, Self::Error> {
        if self.failing {
            return Err(());
        }
        self.reads.push(channel);
        Ok(self.script.pop_front().unwrap_or(self.idle))
    }
}

#[cfg(feature = "async")]
impl lap_beam::AsyncSensor for MockSensor {
    type Channel = MockChannel;
    type Error = ();

    async fn read(&mut self, channel: MockChannel) -> Result<SensorReading, Self::Error> {
        Sensor::read(self, channel)
    }
}

// ============================================================================
// CountingClock - Clock With Read Counter
// ============================================================================

/// Clock advanced by hand that counts reads.
#[derive(Debug, Default)]
pub struct CountingClock {
    now: Cell<u32>,
    reads: Cell<usize>,
}

impl CountingClock {
    /// Create clock at `start_ms`.
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
            reads: Cell::new(0),
        }
    }

    /// Move time forward.
    pub fn advance(&self, delta_ms: u32) {
        self.now.set(self.now.get() + delta_ms);
    }

    /// Number of `now_ms()` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl Clock for CountingClock {
    fn now_ms(&self) -> u32 {
        self.reads.set(self.reads.get() + 1);
        self.now.get()
    }
}

/// Free-running clock: every read moves time forward by `step_ms`.
///
/// Behaves like a hardware `millis()` counter that keeps ticking while the
/// main loop runs.
#[derive(Debug)]
pub struct TickingClock {
    now: Cell<u32>,
    step_ms: u32,
}

impl TickingClock {
    /// Create clock at `start_ms` advancing `step_ms` per read.
    pub fn new(start_ms: u32, step_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
            step_ms,
        }
    }
}

impl Clock for TickingClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}

/// Channel ids as the main loop passes them.
pub const INNER: u8 = MockChannel::Inner as u8;
pub const OUTER: u8 = MockChannel::Outer as u8;

/// Id not wired to any sensor.
pub const UNWIRED: u8 = 9;

/// Check a channel id round-trips through the derived impl.
pub fn channel_label(id: u8) -> Option<&'static str> {
    MockChannel::from_id(id).map(|ch| ch.as_str())
}
