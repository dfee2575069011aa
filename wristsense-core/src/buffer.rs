//! Fixed-Size Ring Buffers for Time-Windowed Sensor History
//!
//! ## Overview
//!
//! Every sub-classifier in this crate reasons over a *time-bounded* window
//! of recent readings: cadence over 60 s, movement intensity over 5 s,
//! altitude change over 6 s. This module provides the ring buffer backing
//! those windows, sized at compile time through const generics so the
//! whole engine runs without heap allocation.
//!
//! ## Design Rationale
//!
//! ### Why time-windowed queries instead of eviction?
//!
//! Sensors report at irregular rates, so "the last N samples" and "the
//! last T milliseconds" are different windows. The ring overwrites oldest
//! entries when full (recent data is worth more than old data), and every
//! aggregate query takes a cutoff timestamp: entries older than the cutoff
//! are simply skipped. That keeps `push` O(1) with no per-push bookkeeping
//! and makes window length a property of the *query*, not the storage.
//!
//! ### Capacity sizing
//!
//! `N` must cover the worst-case sample count inside the longest window a
//! caller will query. Undersizing silently shortens the effective window
//! (oldest entries are overwritten early); it never corrupts results.
//!
//! ### Memory layout
//!
//! Storage is an array of `Option<Reading>` - no unsafe, no MaybeUninit.
//! A `Reading` is 16 bytes (f32 value + u64 timestamp + padding), so a
//! 128-slot ring costs 2 KB.

use crate::time::Timestamp;

/// One timestamped scalar reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Measured value
    pub value: f32,
    /// Monotonic timestamp in milliseconds
    pub timestamp: Timestamp,
}

/// Fixed-capacity ring buffer of timestamped scalar readings
///
/// Overwrites the oldest entry when full. Iteration and all window queries
/// run oldest to newest.
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - entries are in non-decreasing timestamp order when iterated
///   (callers push monotonic timestamps; the ring does not re-sort)
#[derive(Debug, Clone)]
pub struct ScalarRing<const N: usize> {
    data: [Option<Reading>; N],
    write_pos: usize,
    len: usize,
}

impl<const N: usize> ScalarRing<N> {
    /// Creates an empty ring
    ///
    /// Const so rings can live in statics if a platform needs that.
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Push a reading, overwriting the oldest when full
    pub fn push(&mut self, value: f32, timestamp: Timestamp) {
        self.data[self.write_pos] = Some(Reading { value, timestamp });
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no readings are stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if the ring is at capacity
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Fraction of capacity currently populated (0.0-1.0)
    pub fn fill_ratio(&self) -> f32 {
        self.len as f32 / N as f32
    }

    /// Most recent reading
    pub fn newest(&self) -> Option<Reading> {
        if self.is_empty() {
            return None;
        }
        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx]
    }

    /// Oldest retained reading
    pub fn oldest(&self) -> Option<Reading> {
        self.get(0)
    }

    /// Remove all readings
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> ScalarRingIter<'_, N> {
        ScalarRingIter { ring: self, index: 0 }
    }

    /// Count of readings with `timestamp >= cutoff`
    pub fn count_since(&self, cutoff: Timestamp) -> usize {
        self.iter().filter(|r| r.timestamp >= cutoff).count()
    }

    /// Earliest reading with `timestamp >= cutoff`
    pub fn oldest_since(&self, cutoff: Timestamp) -> Option<Reading> {
        self.iter().find(|r| r.timestamp >= cutoff)
    }

    /// Mean value of readings with `timestamp >= cutoff`, or `None` if no
    /// reading falls inside the window
    pub fn mean_since(&self, cutoff: Timestamp) -> Option<f32> {
        let mut sum = 0.0f32;
        let mut n = 0usize;
        for r in self.iter() {
            if r.timestamp >= cutoff {
                sum += r.value;
                n += 1;
            }
        }
        if n == 0 {
            None
        } else {
            Some(sum / n as f32)
        }
    }

    /// Logical index lookup, 0 = oldest
    ///
    /// When full, the oldest element sits at `write_pos`; otherwise logical
    /// and physical indices coincide.
    fn get(&self, index: usize) -> Option<Reading> {
        if index >= self.len {
            return None;
        }

        let actual = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual]
    }
}

impl<const N: usize> Default for ScalarRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ring contents, oldest to newest
pub struct ScalarRingIter<'a, const N: usize> {
    ring: &'a ScalarRing<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for ScalarRingIter<'a, N> {
    type Item = Reading;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.ring.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}
