//! Millisecond clock abstraction.
//!
//! The `Clock` trait is the injected "now" provider used by the evaluator.
//! On hardware it wraps the HAL's millisecond counter; in tests it is a
//! `FixedClock` or a `ManualClock`.

use core::cell::Cell;

/// Platform-agnostic millisecond clock.
///
/// Returns milliseconds elapsed since an arbitrary fixed reference point.
/// Readings must be monotonically non-decreasing (modulo `u32` wrap-around,
/// roughly every 49.7 days). Reading the clock has no side effects.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u32;
}

impl<K: Clock + ?Sized> Clock for &K {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Clock backed by a function, e.g. `FnClock(|| millis())` on an Arduino-style HAL.
#[derive(Debug, Copy, Clone)]
pub struct FnClock<F>(pub F);

impl<F> Clock for FnClock<F>
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        (self.0)()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn now_ms(&self) -> u32 {
        self.0
    }
}

/// Clock advanced by hand.
///
/// Uses interior mutability so a shared reference can be handed to the
/// evaluator while the test (or replay loop) keeps moving time forward.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    /// Create clock at `start_ms`.
    pub const fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Jump to an absolute time.
    ///
    /// Going backwards is ignored to keep readings non-decreasing.
    pub fn set(&self, now_ms: u32) {
        if now_ms > self.now.get() {
            self.now.set(now_ms);
        }
    }

    /// Move time forward by `delta_ms` (wrapping like a hardware counter).
    pub fn advance(&self, delta_ms: u32) {
        self.now.set(self.now.get().wrapping_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}
