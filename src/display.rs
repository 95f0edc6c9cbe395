//! Status lines for character displays.
//!
//! Lines are padded with spaces to the display width so they can be written
//! over the previous content without clearing the LCD first.

use crate::error::LapError;
use crate::evaluator::LapTimes;
use crate::format::LapTime;
use core::fmt::Write;

/// Shown in place of the best lap until one completes.
pub const NO_LAP: &str = "-:--:--";

/// Render `"<label> <current> B<best>"` padded to `W` columns.
///
/// Fails with `BufferTooSmall` if the unpadded line is wider than `W`.
pub fn render_status<const W: usize>(
    label: &str,
    times: &LapTimes,
) -> Result<heapless::String<W>, LapError> {
    let mut line = LineWriter::<W>::new();
    let _ = write!(line, "{} {} B", label, LapTime(times.current_lap));
    match times.best() {
        Some(best) => {
            let _ = write!(line, "{}", LapTime(best));
        }
        None => {
            let _ = line.write_str(NO_LAP);
        }
    }
    line.finish()
}

/// Render `"<label> <lap>"` padded to `W` columns, `NO_LAP` for `None`.
pub fn render_lap<const W: usize>(
    label: &str,
    lap_ms: Option<u32>,
) -> Result<heapless::String<W>, LapError> {
    let mut line = LineWriter::<W>::new();
    let _ = match lap_ms {
        Some(ms) => write!(line, "{} {}", label, LapTime(ms)),
        None => write!(line, "{} {}", label, NO_LAP),
    };
    line.finish()
}

/// Fixed-capacity writer that keeps counting after it runs out of room.
struct LineWriter<const W: usize> {
    buffer: heapless::String<W>,
    required: usize,
}

impl<const W: usize> LineWriter<W> {
    fn new() -> Self {
        Self {
            buffer: heapless::String::new(),
            required: 0,
        }
    }

    fn finish(mut self) -> Result<heapless::String<W>, LapError> {
        if self.required > W {
            return Err(LapError::BufferTooSmall {
                required: self.required,
                capacity: W,
            });
        }
        while self.buffer.push(' ').is_ok() {}
        Ok(self.buffer)
    }
}

impl<const W: usize> Write for LineWriter<W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.required += s.len();
        if self.required <= W {
            // Fits, checked above
            let _ = self.buffer.push_str(s);
        }
        Ok(())
    }
}
