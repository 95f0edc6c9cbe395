//! # lap-beam
//!
//! Lap timing core for embedded beam-sensor lap counters, with zero heap allocation.
//!
//! **Key features:**
//! - **Injected clock** - Any millisecond counter behind the `Clock` trait
//! - **Validated channels** - Sensor channel ids checked against a configured set
//! - **Pure evaluation** - Sensor readings in, updated lap times out
//! - **Fixed-size formatting** - `M:SS:CS` lap times into stack buffers
//! - **Lap history** - Recent laps in a ring buffer (optional)
//!
//! ## Optional Features
//!
//! - `history` - Lap history ring buffer per session
//! - `async` - Async sensor reads
//! - `defmt` - `defmt` logging and `defmt::Format` derives
//! - `replay` - `lap-replay` host binary for recorded sensor traces
//!
//! The library provides a `#[derive(SensorChannel)]` macro that's always available.
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

// Re-export derive macro (always available)
pub use lap_beam_macros::SensorChannel;

// ============================================================================
// Module Declarations
// ============================================================================

mod log;

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod history;
pub mod sensor;
pub mod timer;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Clock sources
pub use clock::{Clock, FixedClock, FnClock, ManualClock};

// Configuration
pub use config::{DefaultConfig, MinimalConfig, TimerConfig};

// Error types
pub use error::LapError;

// Sensors
#[cfg(feature = "async")]
pub use sensor::AsyncSensor;
pub use sensor::{Sensor, SensorChannel, SensorReading, TriggerBand};

// Lap evaluation
pub use evaluator::{LapEvaluator, LapOutcome, LapTimes, LapUpdate, evaluate};

// Formatting
pub use display::{render_lap, render_status};
pub use format::{LAP_TIME_MAX_LEN, LapTime, format_lap_time, write_lap_time};

// Sessions
pub use history::LapHistory;
pub use timer::{LapTimer, StartMode, TimerState};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
