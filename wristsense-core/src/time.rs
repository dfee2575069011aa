//! Time handling for the classification core
//!
//! All timing in this crate is carried by the samples themselves: the
//! sensor-ingestion collaborator stamps every [`crate::events::SensorSample`]
//! with a monotonic millisecond timestamp, and every window, hold timer and
//! eviction decision is computed from deltas between those stamps. The core
//! never reads a wall clock of its own, which keeps it deterministic and
//! trivially replayable from recorded data.

/// Timestamp in milliseconds, monotonic since an arbitrary origin
/// (typically device boot)
pub type Timestamp = u64;

/// Milliseconds elapsed between two timestamps
///
/// Saturates at zero if `later` precedes `earlier` - a clock that stepped
/// backwards must never produce a huge unsigned delta that would instantly
/// expire every window in the system.
#[inline]
pub fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_basic() {
        assert_eq!(elapsed_ms(1000, 2500), 1500);
    }

    #[test]
    fn elapsed_saturates_on_backwards_clock() {
        assert_eq!(elapsed_ms(2000, 1000), 0);
    }
}
