//! Lap time formatting.
//!
//! Renders millisecond values as `M:SS:CS` (minutes, zero-padded seconds,
//! zero-padded centiseconds). Minutes have no fixed width.

use crate::error::LapError;
use core::fmt::{self, Write};

/// Longest rendered lap time: `u32::MAX` ms is `"71582:47:29"`.
pub const LAP_TIME_MAX_LEN: usize = 11;

/// Millisecond duration displayed as `M:SS:CS`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LapTime(pub u32);

impl LapTime {
    /// Total whole minutes.
    pub const fn minutes(&self) -> u32 {
        self.0 / 1000 / 60
    }

    /// Seconds within the minute (0-59).
    pub const fn seconds(&self) -> u32 {
        (self.0 / 1000) % 60
    }

    /// Centiseconds within the second (0-99).
    pub const fn centiseconds(&self) -> u32 {
        (self.0 % 1000) / 10
    }
}

impl From<u32> for LapTime {
    fn from(ms: u32) -> Self {
        Self(ms)
    }
}

impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}",
            self.minutes(),
            self.seconds(),
            self.centiseconds()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LapTime {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{=u32}:{=u32:02}:{=u32:02}",
            self.minutes(),
            self.seconds(),
            self.centiseconds()
        );
    }
}

/// Format milliseconds into an owned, stack-allocated string.
pub fn format_lap_time(ms: u32) -> heapless::String<LAP_TIME_MAX_LEN> {
    let mut out = heapless::String::new();
    // Cannot fail: LAP_TIME_MAX_LEN covers u32::MAX
    let _ = write!(out, "{}", LapTime(ms));
    out
}

/// Write `M:SS:CS` as ASCII into `buf` and return the number of bytes written.
///
/// No terminator is appended. If `buf` is shorter than the rendered string,
/// nothing is written and `BufferTooSmall` is returned.
pub fn write_lap_time(ms: u32, buf: &mut [u8]) -> Result<usize, LapError> {
    let rendered = format_lap_time(ms);
    let bytes = rendered.as_bytes();
    if bytes.len() > buf.len() {
        return Err(LapError::BufferTooSmall {
            required: bytes.len(),
            capacity: buf.len(),
        });
    }
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}
