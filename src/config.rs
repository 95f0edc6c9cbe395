//! Configuration traits and implementations for lap timing.
//!
//! The `TimerConfig` trait fixes the default trigger band and buffer sizes
//! at compile time without runtime overhead.

/// Lap timer configuration trait.
///
/// All values are const (zero runtime cost). The trigger band can still be
/// overridden per evaluator with [`LapEvaluator::with_band`](crate::LapEvaluator::with_band).
pub trait TimerConfig {
    /// Exclusive lower bound of the default trigger band (default: 100)
    const TRIGGER_LOW: u16;

    /// Exclusive upper bound of the default trigger band (default: 200)
    const TRIGGER_HIGH: u16;

    /// Completed laps remembered per session (default: 10)
    const HISTORY_SIZE: usize;

    /// Character display width for status lines (default: 20)
    const LINE_WIDTH: usize;
}

/// Default configuration for a 20x4 character LCD lap counter.
///
/// - TRIGGER band: 100 < reading < 200
/// - HISTORY_SIZE: 10 laps
/// - LINE_WIDTH: 20 columns
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DefaultConfig;

impl TimerConfig for DefaultConfig {
    const TRIGGER_LOW: u16 = 100;
    const TRIGGER_HIGH: u16 = 200;
    const HISTORY_SIZE: usize = 10;
    const LINE_WIDTH: usize = 20;
}

/// Minimal configuration for memory-limited devices.
///
/// - TRIGGER band: 100 < reading < 200
/// - HISTORY_SIZE: 4 laps
/// - LINE_WIDTH: 16 columns (16x2 LCD)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MinimalConfig;

impl TimerConfig for MinimalConfig {
    const TRIGGER_LOW: u16 = 100;
    const TRIGGER_HIGH: u16 = 200;
    const HISTORY_SIZE: usize = 4;
    const LINE_WIDTH: usize = 16;
}
