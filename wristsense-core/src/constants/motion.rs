//! Motion Classification Constants
//!
//! Thresholds for per-tick dynamic/static flagging, the sliding-window
//! majority vote, the top-level hysteresis hold, and the cadence bands used
//! by the dynamic-activity sub-classifier.

// ===== PER-TICK FLAGS =====

/// Gyroscope RMS above which a tick counts as dynamic (rad/s).
///
/// A wrist at rest shows well under 1 rad/s of combined rotation even with
/// small fidgets; deliberate movement pushes past 3.
pub const GYRO_DYNAMIC_THRESHOLD_RAD_PER_S: f32 = 3.0;

/// Deviation of accelerometer magnitude from gravity above which a tick
/// counts as dynamic (m/s²).
pub const ACCEL_DYNAMIC_DELTA_M_PER_S2: f32 = 1.5;

// ===== WINDOW AGGREGATION =====

/// Wall-clock length of the tick aggregation window (ms).
///
/// Computed from sample timestamps, not sample count, so irregular sensor
/// rates do not stretch or shrink the effective window.
pub const AGGREGATION_WINDOW_MS: u64 = 2000;

/// Fraction of dynamic ticks required for a Dynamic window candidate.
///
/// Strictly greater-than: a window sitting exactly at the threshold stays
/// Transient.
pub const DYNAMIC_RATIO_THRESHOLD: f32 = 0.6;

/// Fraction of static ticks required for a Static window candidate.
pub const STATIC_RATIO_THRESHOLD: f32 = 0.6;

// ===== TOP-LEVEL HYSTERESIS =====

/// Minimum time the emitted activity state is held before any change is
/// accepted (ms). Applies uniformly in both directions, so oscillation
/// between any two states is damped identically.
pub const MIN_HOLD_MS: u64 = 1500;

// ===== DYNAMIC SUB-CLASSIFIER =====

/// Cadence window for steps-per-minute estimation (ms).
///
/// A 60 s window means the retained step count *is* the cadence in
/// steps/minute; no scaling needed.
pub const CADENCE_WINDOW_MS: u64 = 60_000;

/// Short horizon for the climbing check (ms).
pub const CLIMB_WINDOW_MS: u64 = 6000;

/// Window for the movement-intensity SMA (ms).
pub const SMA_WINDOW_MS: u64 = 5000;

/// Cadence at or above which the wearer is running (steps/min).
pub const RUNNING_CADENCE_SPM: f32 = 150.0;

/// Altitude gain over the short horizon that indicates climbing (m).
pub const CLIMB_ALT_GAIN_M: f32 = 0.5;

/// Minimum steps within the short horizon for a climbing call.
pub const CLIMB_MIN_STEPS: usize = 3;

/// Cadence below which low-step high-intensity movement counts as
/// stationary exercise rather than walking (steps/min).
pub const EXERCISE_CADENCE_MAX_SPM: f32 = 60.0;

/// Movement-intensity SMA above which exercise is plausible (m/s²).
pub const EXERCISE_SMA_MIN_M_PER_S2: f32 = 2.5;

/// Heart rate above which exercise is plausible (bpm).
pub const EXERCISE_HR_MIN_BPM: f32 = 100.0;
