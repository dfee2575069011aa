//! Constants for WristSense Core
//!
//! This module centralizes every numeric threshold, window length and filter
//! coefficient used by the classification engine. All values are defined here
//! with an explanation of their purpose and origin.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Physics**: Barometric formula and gravity reference
//! - **Motion**: Dynamic-movement thresholds and cadence bands
//! - **Posture**: Orientation bands and confirmation delays
//! - **Stairs**: Floor-climb gating parameters
//! - **Sleep**: Entry/exit hysteresis thresholds and hold times
//! - **Ppg**: Band-pass coefficients, feature layout, rule thresholds
//! - **Time**: Unit conversions and default window lengths
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, document purpose and source
//! 3. Use descriptive names that include units

/// Barometric altitude formula and gravity reference.
pub mod physics;

/// Dynamic-movement thresholds, majority-vote ratios and cadence bands.
pub mod motion;

/// Orientation bands, tilt thresholds and posture confirmation delays.
pub mod posture;

/// Floor-climb detection parameters.
pub mod stairs;

/// Sleep entry/exit thresholds and hold durations.
pub mod sleep;

/// PPG filter coefficients, feature-vector layout and rule thresholds.
pub mod ppg;

/// Time unit conversions and default analysis windows.
pub mod time;

// Re-export commonly used constants for convenience
pub use physics::{
    BAROMETRIC_ALTITUDE_EXPONENT, BAROMETRIC_ALTITUDE_SCALE_M, GRAVITY_M_PER_S2,
    SEA_LEVEL_PRESSURE_HPA,
};

pub use motion::{
    ACCEL_DYNAMIC_DELTA_M_PER_S2, AGGREGATION_WINDOW_MS, DYNAMIC_RATIO_THRESHOLD,
    GYRO_DYNAMIC_THRESHOLD_RAD_PER_S, MIN_HOLD_MS, STATIC_RATIO_THRESHOLD,
};

pub use posture::POSTURE_ENTRY_DELAY_MS;

pub use sleep::{SLEEP_ENTRY_HOLD_MS, SLEEP_EXIT_HOLD_MS};

pub use ppg::{BANDPASS_A, BANDPASS_B, FEATURE_COUNT, PPG_DESIGN_RATE_HZ};

pub use time::{MS_PER_MINUTE, MS_PER_SECOND};
