//! Error types for lap timing operations.
//!
//! The `LapError` enum represents all failure conditions of the evaluator,
//! the formatter and the session. Everything else in the crate is total.

use core::fmt;

/// Lap timing error type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LapError {
    /// Output buffer cannot hold the rendered string
    BufferTooSmall {
        /// Bytes needed for the full string
        required: usize,
        /// Bytes available in the caller's buffer
        capacity: usize,
    },

    /// Sensor channel id is not part of the configured sensor set
    InvalidChannel(u8),

    /// Trigger band bounds leave no value inside the band
    InvalidTriggerBand {
        /// Exclusive lower bound
        low: u16,
        /// Exclusive upper bound
        high: u16,
    },

    /// Sensor driver reported a read failure
    SensorRead,

    /// Session polled before `start()`
    NotRunning,
}

impl fmt::Display for LapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LapError::BufferTooSmall { required, capacity } => {
                write!(f, "Buffer too small: need {}, have {}", required, capacity)
            }
            LapError::InvalidChannel(id) => write!(f, "Invalid sensor channel {}", id),
            LapError::InvalidTriggerBand { low, high } => {
                write!(f, "Empty trigger band ({}, {})", low, high)
            }
            LapError::SensorRead => write!(f, "Sensor read failed"),
            LapError::NotRunning => write!(f, "Lap timer not running"),
        }
    }
}
