//! Posture Classification Constants
//!
//! Two different orientation parameterizations coexist here, matching the
//! two classifiers that consume them:
//!
//! - The *tick classifier* works in pitch/roll bands (static-flag gating).
//! - The *static posture classifier* works on a single tilt angle measured
//!   from the device z-axis (0° = lying flat, 90° = upright).

// ===== PITCH/ROLL BANDS (tick classifier static flag) =====

/// Maximum |pitch| for the standing band (degrees).
pub const STANDING_PITCH_MAX_DEG: f32 = 10.0;

/// Minimum |pitch| for the sitting band (degrees).
pub const SITTING_PITCH_MIN_DEG: f32 = 20.0;

/// Maximum |pitch| for the sitting band (degrees).
pub const SITTING_PITCH_MAX_DEG: f32 = 70.0;

/// Maximum |roll| for the sitting band (degrees).
pub const SITTING_ROLL_MAX_DEG: f32 = 30.0;

/// Minimum |pitch| for the lying band (degrees).
pub const LYING_PITCH_MIN_DEG: f32 = 75.0;

// ===== TILT THRESHOLDS (static posture classifier) =====

/// Tilt below which the candidate posture is lying (degrees).
pub const LYING_TILT_MAX_DEG: f32 = 25.0;

/// Tilt below which the candidate posture is sitting (degrees).
pub const SITTING_TILT_MAX_DEG: f32 = 65.0;

/// Tilt at or below which the candidate posture is standing (degrees).
/// Beyond this the device is inverted and the candidate is Unknown.
pub const STANDING_TILT_MAX_DEG: f32 = 120.0;

// ===== CONFIRMATION =====

/// Time a posture candidate must persist continuously before it becomes
/// the confirmed posture (ms). Any candidate change restarts the timer.
pub const POSTURE_ENTRY_DELAY_MS: u64 = 7000;

/// Length of the auxiliary accel/HR/PPG history rings kept by the static
/// classifier (ms). Classification currently uses only the latest
/// acceleration sample; the rings exist for refinement signals.
pub const POSTURE_HISTORY_WINDOW_MS: u64 = 5000;
