//! Lap evaluation from sensor readings.
//!
//! `evaluate()` is the pure core: given a reading, the trigger band, the
//! current timer values and a clock, it returns the updated timer values.
//! `LapEvaluator` adds channel validation and the sensor read on top.

use crate::clock::Clock;
use crate::config::{DefaultConfig, TimerConfig};
use crate::error::LapError;
use crate::log;
use crate::sensor::{Sensor, SensorReading, TriggerBand, resolve_channel};
use core::marker::PhantomData;

#[cfg(feature = "async")]
use crate::sensor::AsyncSensor;

/// Lap timer values in milliseconds.
///
/// Owned by the caller and passed by value; evaluator results come back as a
/// new `LapTimes` inside [`LapUpdate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LapTimes {
    /// Duration of the lap in progress
    pub current_lap: u32,

    /// Fastest completed lap (`NO_BEST_LAP` until one completes)
    pub best_lap: u32,

    /// Clock reading at the last trigger (start of the lap in progress)
    pub previous_lap: u32,
}

impl LapTimes {
    /// Sentinel for "no lap completed yet".
    pub const NO_BEST_LAP: u32 = u32::MAX;

    /// Timer values right after a reset at `now_ms`.
    pub const fn reset(now_ms: u32) -> Self {
        Self {
            current_lap: 0,
            best_lap: Self::NO_BEST_LAP,
            previous_lap: now_ms,
        }
    }

    /// Recompute `current_lap` as time elapsed since `previous_lap`.
    pub fn tick(&mut self, now_ms: u32) {
        self.current_lap = now_ms.wrapping_sub(self.previous_lap);
    }

    /// Best lap, if one has completed.
    pub fn best(&self) -> Option<u32> {
        (self.best_lap != Self::NO_BEST_LAP).then_some(self.best_lap)
    }
}

/// What a single evaluation observed.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LapOutcome {
    /// Reading outside the trigger band, nothing changed
    Idle = 0,

    /// Line crossed, lap marked, no new record
    LapCompleted = 1,

    /// Line crossed and the finished lap is the new best
    NewBest = 2,
}

impl LapOutcome {
    /// Check if the line was crossed.
    pub fn is_trigger(&self) -> bool {
        !matches!(self, LapOutcome::Idle)
    }
}

/// Result of one evaluation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LapUpdate {
    /// Updated timer values
    pub times: LapTimes,

    /// What happened
    pub outcome: LapOutcome,
}

/// Evaluate one sensor reading against the trigger band.
///
/// On a trigger, `best_lap` takes `current_lap` if it is lower, and
/// `previous_lap` is always set to the clock reading. The clock is only read
/// on a trigger. Outside the band, `times` is returned unchanged.
pub fn evaluate<K: Clock + ?Sized>(
    reading: SensorReading,
    band: &TriggerBand,
    times: LapTimes,
    clock: &K,
) -> LapUpdate {
    if !band.contains(reading) {
        return LapUpdate {
            times,
            outcome: LapOutcome::Idle,
        };
    }

    let mut updated = times;
    let mut outcome = LapOutcome::LapCompleted;

    if updated.current_lap < updated.best_lap {
        updated.best_lap = updated.current_lap;
        outcome = LapOutcome::NewBest;
        log::debug!("new best lap {=u32} ms", updated.best_lap);
    }

    // Lap end is marked on every trigger, record or not
    updated.previous_lap = clock.now_ms();
    log::trace!("trigger at {=u32} ms, reading {=u16}", updated.previous_lap, reading);

    LapUpdate {
        times: updated,
        outcome,
    }
}

/// Sensor check bound to a sensor, a clock and a trigger band.
///
/// Generic over:
/// - `S`: Sensor implementation (its `Channel` type is the configured sensor set)
/// - `K`: Clock implementation
/// - `C`: TimerConfig implementation (default trigger band)
pub struct LapEvaluator<S, K, C = DefaultConfig>
where
    K: Clock,
    C: TimerConfig,
{
    /// Sensor driver
    sensor: S,

    /// Millisecond clock
    clock: K,

    /// Active trigger band
    band: TriggerBand,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

impl<S, K, C> core::fmt::Debug for LapEvaluator<S, K, C>
where
    K: Clock,
    C: TimerConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LapEvaluator")
            .field("band", &self.band)
            .finish_non_exhaustive()
    }
}

impl<S, K, C> LapEvaluator<S, K, C>
where
    K: Clock,
    C: TimerConfig,
{
    /// Create evaluator with the config's default trigger band.
    pub fn new(sensor: S, clock: K) -> Result<Self, LapError> {
        let band = TriggerBand::new(C::TRIGGER_LOW, C::TRIGGER_HIGH)?;
        Ok(Self::with_band(sensor, clock, band))
    }

    /// Create evaluator with an explicit trigger band.
    pub fn with_band(sensor: S, clock: K, band: TriggerBand) -> Self {
        Self {
            sensor,
            clock,
            band,
            _config: PhantomData,
        }
    }

    /// Active trigger band.
    pub fn band(&self) -> &TriggerBand {
        &self.band
    }

    /// Replace the trigger band (e.g. after recalibrating the sensor).
    pub fn set_band(&mut self, band: TriggerBand) {
        self.band = band;
    }

    /// Get reference to the clock.
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Get reference to the sensor.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Get mutable reference to the sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Consume the evaluator and return sensor and clock.
    pub fn into_parts(self) -> (S, K) {
        (self.sensor, self.clock)
    }
}

impl<S, K, C> LapEvaluator<S, K, C>
where
    S: Sensor,
    K: Clock,
    C: TimerConfig,
{
    /// Read one sample from `channel`.
    ///
    /// Fails with `InvalidChannel` for ids outside `S::Channel` (the sensor is
    /// not touched) and `SensorRead` if the driver fails. The clock is not read.
    pub fn read(&mut self, channel: u8) -> Result<SensorReading, LapError> {
        let channel = resolve_channel::<S::Channel>(channel).inspect_err(|_| {
            log::warning!("invalid sensor channel {=u8}", channel);
        })?;

        self.sensor.read(channel).map_err(|_| {
            log::warning!(
                "sensor read failed on channel {=u8}",
                crate::sensor::SensorChannel::id(&channel)
            );
            LapError::SensorRead
        })
    }

    /// Read `channel` and evaluate the reading against `times`.
    ///
    /// Errors as for [`read`](Self::read).
    pub fn check_sensor(&mut self, channel: u8, times: LapTimes) -> Result<LapUpdate, LapError> {
        let reading = self.read(channel)?;
        Ok(evaluate(reading, &self.band, times, &self.clock))
    }
}

#[cfg(feature = "async")]
impl<S, K, C> LapEvaluator<S, K, C>
where
    S: AsyncSensor,
    K: Clock,
    C: TimerConfig,
{
    /// Async version of [`read`](Self::read) (requires `async` feature).
    pub async fn read_async(&mut self, channel: u8) -> Result<SensorReading, LapError> {
        let channel = resolve_channel::<S::Channel>(channel).inspect_err(|_| {
            log::warning!("invalid sensor channel {=u8}", channel);
        })?;

        self.sensor.read(channel).await.map_err(|_| {
            log::warning!(
                "sensor read failed on channel {=u8}",
                crate::sensor::SensorChannel::id(&channel)
            );
            LapError::SensorRead
        })
    }

    /// Async version of [`check_sensor`](Self::check_sensor) (requires `async` feature).
    pub async fn check_sensor_async(
        &mut self,
        channel: u8,
        times: LapTimes,
    ) -> Result<LapUpdate, LapError> {
        let reading = self.read_async(channel).await?;
        Ok(evaluate(reading, &self.band, times, &self.clock))
    }
}
