//! Core classification engine for WristSense
//!
//! Turns noisy, irregularly sampled wearable sensor streams (accelerometer,
//! gyroscope, barometer, step detector, PPG/heart rate) into a stable
//! activity and posture state using deterministic signal processing and
//! hysteresis state machines. No network, no ML inference, no allocation
//! in the hot path.
//!
//! Key constraints:
//! - Runs on small wearable MCUs (no_std capable)
//! - No heap allocation while classifying
//! - Every update completes in microseconds
//! - Degrades to safe defaults instead of erroring at runtime
//!
//! ```no_run
//! use wristsense_core::{ActivityMonitor, SensorSample};
//!
//! let mut monitor = ActivityMonitor::default();
//!
//! let sample = SensorSample::accel_gyro(1000, [0.0, 0.0, 9.81], [0.0; 3]);
//! let state = monitor.process(&sample);
//!
//! // Emitted state is debounced; starts as Transient
//! let _ = state;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod calibration;
pub mod classify;
pub mod constants;
pub mod errors;
pub mod events;
pub mod monitor;
pub mod signal;
pub mod stream;
pub mod time;

// Public API
pub use errors::{ConfigError, ConfigResult};
pub use events::{
    ActivityState, AggregateWindow, DynamicActivity, Posture, SensorSample, Tick, WindowCategory,
};
pub use monitor::ActivityMonitor;
pub use signal::features::FeatureVector;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
