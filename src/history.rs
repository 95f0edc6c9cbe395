//! Completed lap history.
//!
//! Uses stub type pattern - struct always exists, but behavior is feature-gated.

#![cfg_attr(not(feature = "history"), allow(unused_variables))]

/// Most recent completed lap durations (milliseconds).
///
/// When `history` feature is enabled, stores laps in a ring buffer that
/// evicts the oldest lap when full.
/// When disabled, zero-size stub that no-ops all operations.
#[derive(Debug, Clone)]
pub struct LapHistory<const N: usize> {
    #[cfg(feature = "history")]
    laps: heapless::Deque<u32, N>,
}

impl<const N: usize> LapHistory<N> {
    /// Create empty history.
    pub const fn new() -> Self {
        Self {
            #[cfg(feature = "history")]
            laps: heapless::Deque::new(),
        }
    }

    /// Record a completed lap.
    #[cfg(feature = "history")]
    pub fn push(&mut self, lap_ms: u32) {
        if self.laps.is_full() {
            self.laps.pop_front();
        }
        let _ = self.laps.push_back(lap_ms);
    }

    /// Record a completed lap (stub version - no-op).
    #[cfg(not(feature = "history"))]
    pub fn push(&mut self, lap_ms: u32) {
        // No-op
    }

    /// Most recent lap.
    #[cfg(feature = "history")]
    pub fn last(&self) -> Option<u32> {
        self.laps.back().copied()
    }

    /// Most recent lap (stub version - returns None).
    #[cfg(not(feature = "history"))]
    pub fn last(&self) -> Option<u32> {
        None
    }

    /// Number of stored laps.
    #[cfg(feature = "history")]
    pub fn len(&self) -> usize {
        self.laps.len()
    }

    /// Number of stored laps (stub version - always 0).
    #[cfg(not(feature = "history"))]
    pub fn len(&self) -> usize {
        0
    }

    /// Check if no laps are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate stored laps, oldest first.
    #[cfg(feature = "history")]
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.laps.iter().copied()
    }

    /// Iterate stored laps (stub version - empty).
    #[cfg(not(feature = "history"))]
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        core::iter::empty()
    }

    /// Mean of stored laps, rounded down.
    pub fn average(&self) -> Option<u32> {
        let count = self.len() as u64;
        if count == 0 {
            return None;
        }
        let total: u64 = self.iter().map(u64::from).sum();
        Some((total / count) as u32)
    }

    /// Fastest stored lap.
    pub fn fastest(&self) -> Option<u32> {
        self.iter().min()
    }

    /// Drop all stored laps.
    #[cfg(feature = "history")]
    pub fn clear(&mut self) {
        self.laps.clear();
    }

    /// Drop all stored laps (stub version - no-op).
    #[cfg(not(feature = "history"))]
    pub fn clear(&mut self) {
        // No-op
    }
}

impl<const N: usize> Default for LapHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}
