//! Sleep Detection Constants
//!
//! Entry and exit use independent hysteresis timers with deliberately
//! asymmetric thresholds (0.25 vs 0.5 m/s² SMA) so that the boundary region
//! between them cannot cause flapping.

/// Movement-intensity SMA below which sleep entry is possible (m/s²).
pub const SLEEP_SMA_MAX_M_PER_S2: f32 = 0.25;

/// Heart rate below which sleep entry is possible (bpm).
pub const SLEEP_HR_MAX_BPM: f32 = 55.0;

/// Movement-intensity SMA above which sleep exit is possible (m/s²).
pub const WAKE_SMA_MIN_M_PER_S2: f32 = 0.5;

/// Heart rate above which sleep exit is possible (bpm).
pub const WAKE_HR_MIN_BPM: f32 = 55.0;

/// Continuous time the entry condition must hold before Sleeping (ms).
pub const SLEEP_ENTRY_HOLD_MS: u64 = 180_000;

/// Continuous time the exit condition must hold before waking (ms).
pub const SLEEP_EXIT_HOLD_MS: u64 = 180_000;

/// Exit hold when *both* exit conditions hold simultaneously (ms).
pub const SLEEP_EXIT_HOLD_FAST_MS: u64 = 90_000;

/// Fraction of the SMA ring that must be populated before the detector
/// considers its movement estimate trustworthy.
pub const SMA_READY_RATIO: f32 = 0.8;

/// Window for the sleep movement-intensity SMA (ms).
pub const SLEEP_SMA_WINDOW_MS: u64 = 5000;
