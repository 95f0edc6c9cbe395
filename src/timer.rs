//! Lap timer session for one lane.
//!
//! The `LapTimer` struct owns the timer values the main loop would otherwise
//! keep in globals: it ticks the current lap from the clock, runs the sensor
//! check and records completed laps.

use crate::clock::{Clock, FixedClock};
use crate::config::{DefaultConfig, TimerConfig};
use crate::error::LapError;
use crate::evaluator::{LapEvaluator, LapOutcome, LapTimes, LapUpdate, evaluate};
use crate::history::LapHistory;
use crate::log;
use crate::sensor::{Sensor, SensorReading, TriggerBand};

/// Session state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Not timing, `poll()` fails
    Stopped,

    /// Flying start: waiting for the first crossing
    Armed,

    /// Timing laps
    Running,
}

/// How the first lap starts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartMode {
    /// Lap one runs from `start()` to the first crossing
    #[default]
    Standing,

    /// The first crossing only starts lap one
    Flying,
}

/// Lap timer session.
///
/// Generic over:
/// - `S`: Sensor implementation
/// - `K`: Clock implementation
/// - `C`: TimerConfig implementation
/// - `N`: history size (normally `C::HISTORY_SIZE`)
pub struct LapTimer<S, K, C = DefaultConfig, const N: usize = 10>
where
    K: Clock,
    C: TimerConfig,
{
    /// Sensor check
    evaluator: LapEvaluator<S, K, C>,

    /// Timer values of the lap in progress
    times: LapTimes,

    /// Session state
    state: TimerState,

    /// First lap behavior
    start_mode: StartMode,

    /// Triggers sooner than this after the last one are ignored (0 = off)
    min_lap_ms: u32,

    /// Completed laps this session
    lap_count: u16,

    /// Recent completed laps
    history: LapHistory<N>,
}

impl<S, K, C, const N: usize> core::fmt::Debug for LapTimer<S, K, C, N>
where
    K: Clock,
    C: TimerConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LapTimer")
            .field("state", &self.state)
            .field("times", &self.times)
            .field("lap_count", &self.lap_count)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl<S, K, C, const N: usize> LapTimer<S, K, C, N>
where
    K: Clock,
    C: TimerConfig,
{
    /// Create a stopped session with the config's default trigger band.
    pub fn new(sensor: S, clock: K) -> Result<Self, LapError> {
        Ok(Self::from_evaluator(LapEvaluator::new(sensor, clock)?))
    }

    /// Create a stopped session with an explicit trigger band.
    pub fn with_band(sensor: S, clock: K, band: TriggerBand) -> Self {
        Self::from_evaluator(LapEvaluator::with_band(sensor, clock, band))
    }

    /// Create a stopped session around an existing evaluator.
    pub fn from_evaluator(evaluator: LapEvaluator<S, K, C>) -> Self {
        let now = evaluator.clock().now_ms();
        Self {
            evaluator,
            times: LapTimes::reset(now),
            state: TimerState::Stopped,
            start_mode: StartMode::Standing,
            min_lap_ms: 0,
            lap_count: 0,
            history: LapHistory::new(),
        }
    }

    /// Builder method to select the start mode.
    pub fn start_mode(mut self, mode: StartMode) -> Self {
        self.start_mode = mode;
        self
    }

    /// Builder method to ignore triggers closer than `min_lap_ms` to the last one.
    ///
    /// A car sitting in the beam produces a run of in-band readings; this
    /// keeps them from counting as laps.
    pub fn min_lap(mut self, min_lap_ms: u32) -> Self {
        self.min_lap_ms = min_lap_ms;
        self
    }

    /// Reset the session and start timing now.
    pub fn start(&mut self) {
        let now = self.evaluator.clock().now_ms();
        self.times = LapTimes::reset(now);
        self.lap_count = 0;
        self.history.clear();
        self.state = match self.start_mode {
            StartMode::Standing => TimerState::Running,
            StartMode::Flying => TimerState::Armed,
        };
        log::debug!("lap timer started at {=u32} ms", now);
    }

    /// Stop timing. Recorded laps stay available.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
        log::debug!("lap timer stopped after {=u16} laps", self.lap_count);
    }

    /// Current session state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Timer values of the lap in progress.
    pub fn times(&self) -> &LapTimes {
        &self.times
    }

    /// Completed laps this session.
    pub fn lap_count(&self) -> u16 {
        self.lap_count
    }

    /// Best lap, if one has completed.
    pub fn best_lap(&self) -> Option<u32> {
        self.times.best()
    }

    /// Recent completed laps.
    pub fn history(&self) -> &LapHistory<N> {
        &self.history
    }

    /// Get reference to the underlying evaluator.
    pub fn evaluator(&self) -> &LapEvaluator<S, K, C> {
        &self.evaluator
    }

    /// Get mutable reference to the underlying evaluator.
    pub fn evaluator_mut(&mut self) -> &mut LapEvaluator<S, K, C> {
        &mut self.evaluator
    }

    /// Evaluate a reading taken at `now_ms` and apply it to the session.
    fn apply(&mut self, reading: SensorReading, now_ms: u32) -> LapUpdate {
        self.times.tick(now_ms);
        let update = evaluate(
            reading,
            self.evaluator.band(),
            self.times,
            &FixedClock(now_ms),
        );

        if !update.outcome.is_trigger() {
            self.times = update.times;
            return update;
        }

        if self.state == TimerState::Armed {
            // Crossing starts lap one, nothing completed yet
            self.times = LapTimes::reset(update.times.previous_lap);
            self.state = TimerState::Running;
            log::debug!("flying start at {=u32} ms", update.times.previous_lap);
            return LapUpdate {
                times: self.times,
                outcome: LapOutcome::Idle,
            };
        }

        if self.times.current_lap < self.min_lap_ms {
            log::trace!("trigger ignored, lap {=u32} ms too short", self.times.current_lap);
            return LapUpdate {
                times: self.times,
                outcome: LapOutcome::Idle,
            };
        }

        let completed = self.times.current_lap;
        self.history.push(completed);
        self.lap_count = self.lap_count.saturating_add(1);
        self.times = update.times;
        log::debug!("lap {=u16} completed in {=u32} ms", self.lap_count, completed);
        update
    }
}

impl<S, K, C, const N: usize> LapTimer<S, K, C, N>
where
    S: Sensor,
    K: Clock,
    C: TimerConfig,
{
    /// Tick the lap in progress and check the sensor on `channel`.
    ///
    /// Returns the evaluation as applied to the session; triggers swallowed
    /// by the flying start or the minimum lap guard come back as `Idle`.
    pub fn poll(&mut self, channel: u8) -> Result<LapUpdate, LapError> {
        if self.state == TimerState::Stopped {
            return Err(LapError::NotRunning);
        }

        let reading = self.evaluator.read(channel)?;
        // One clock sample per poll: the lap mark and the completed lap must agree
        let now = self.evaluator.clock().now_ms();
        Ok(self.apply(reading, now))
    }
}

#[cfg(feature = "async")]
impl<S, K, C, const N: usize> LapTimer<S, K, C, N>
where
    S: crate::sensor::AsyncSensor,
    K: Clock,
    C: TimerConfig,
{
    /// Async version of [`poll`](Self::poll) (requires `async` feature).
    pub async fn poll_async(&mut self, channel: u8) -> Result<LapUpdate, LapError> {
        if self.state == TimerState::Stopped {
            return Err(LapError::NotRunning);
        }

        let reading = self.evaluator.read_async(channel).await?;
        let now = self.evaluator.clock().now_ms();
        Ok(self.apply(reading, now))
    }
}
