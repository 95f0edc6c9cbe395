//! Sensor abstraction and trigger band.
//!
//! The `Sensor` trait provides analog reads that can be implemented for any
//! platform (ADC pin, I2C light sensor, replayed trace, etc.). Channel ids
//! are validated through `SensorChannel` before the sensor is touched.

use crate::error::LapError;

/// One analog sample (10-bit ADC range on most boards).
pub type SensorReading = u16;

/// Configured sensor set.
///
/// Implement this trait (or `#[derive(SensorChannel)]`) on a fieldless enum
/// listing the channels wired to beam sensors.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// pub enum Lane {
///     Inner = 0,
///     Outer = 1,
/// }
///
/// impl SensorChannel for Lane {
///     fn from_id(id: u8) -> Option<Self> {
///         match id {
///             0 => Some(Self::Inner),
///             1 => Some(Self::Outer),
///             _ => None,
///         }
///     }
///
///     fn id(&self) -> u8 {
///         *self as u8
///     }
///
///     fn as_str(&self) -> &'static str {
///         match self {
///             Self::Inner => "Inner",
///             Self::Outer => "Outer",
///         }
///     }
/// }
/// ```
pub trait SensorChannel: Copy + 'static {
    /// Resolve raw channel id. `None` if the id is not wired.
    fn from_id(id: u8) -> Option<Self>
    where
        Self: Sized;

    /// Raw channel id.
    fn id(&self) -> u8;

    /// Channel label.
    fn as_str(&self) -> &'static str;
}

/// Resolve a raw channel id or fail with `InvalidChannel`.
pub fn resolve_channel<Ch: SensorChannel>(id: u8) -> Result<Ch, LapError> {
    Ch::from_id(id).ok_or(LapError::InvalidChannel(id))
}

/// Platform-agnostic analog sensor.
pub trait Sensor {
    /// Channels this sensor can sample
    type Channel: SensorChannel;

    /// Platform-specific error type
    type Error;

    /// Read one sample from `channel`.
    fn read(&mut self, channel: Self::Channel) -> Result<SensorReading, Self::Error>;
}

impl<S: Sensor + ?Sized> Sensor for &mut S {
    type Channel = S::Channel;
    type Error = S::Error;

    fn read(&mut self, channel: Self::Channel) -> Result<SensorReading, Self::Error> {
        (**self).read(channel)
    }
}

/// Async analog sensor (requires `async` feature).
///
/// Uses `async fn` without Send bounds for both single and multi-threaded executors.
#[cfg(feature = "async")]
pub trait AsyncSensor {
    /// Channels this sensor can sample
    type Channel: SensorChannel;

    /// Platform-specific error type
    type Error;

    /// Read one sample from `channel`, awaiting conversion.
    #[allow(async_fn_in_trait)]
    async fn read(&mut self, channel: Self::Channel) -> Result<SensorReading, Self::Error>;
}

/// Sensor value range interpreted as "vehicle crossed the line".
///
/// Both bounds are exclusive: `low < reading < high`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerBand {
    low: SensorReading,
    high: SensorReading,
}

impl TriggerBand {
    /// Create a trigger band.
    ///
    /// Fails with `InvalidTriggerBand` when no reading can fall inside.
    pub const fn new(low: SensorReading, high: SensorReading) -> Result<Self, LapError> {
        if (high as u32) <= (low as u32) + 1 {
            return Err(LapError::InvalidTriggerBand { low, high });
        }
        Ok(Self { low, high })
    }

    /// Exclusive lower bound.
    pub const fn low(&self) -> SensorReading {
        self.low
    }

    /// Exclusive upper bound.
    pub const fn high(&self) -> SensorReading {
        self.high
    }

    /// Check whether `reading` is a trigger.
    pub const fn contains(&self, reading: SensorReading) -> bool {
        reading > self.low && reading < self.high
    }
}
