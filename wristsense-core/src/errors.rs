//! Error Types for Classifier Configuration
//!
//! ## Design Philosophy
//!
//! WristSense follows a strict "degrade, don't fail" policy at runtime:
//! insufficient window data yields zeroed features, a missing calibration
//! profile yields the fallback posture, sensor gaps leave rings under-filled
//! and postpone evaluation. None of those paths return an error.
//!
//! The one category surfaced as a hard failure is malformed *static*
//! configuration: a zero-length window, a negative threshold, a hold timer
//! of zero milliseconds. Those are programming mistakes, caught once at
//! construction time, never in the sample path.
//!
//! Errors are kept small and `Copy` with `&'static str` field names only,
//! so they cost nothing to return and work without an allocator.

use thiserror_no_std::Error;

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - the only hard-failure category in the crate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A time window or hold duration was configured as zero
    #[error("duration for `{field}` must be greater than zero")]
    ZeroDuration {
        /// Name of the offending configuration field
        field: &'static str,
    },

    /// A threshold was configured outside its meaningful range
    #[error("threshold `{field}` is outside its valid range")]
    InvalidThreshold {
        /// Name of the offending configuration field
        field: &'static str,
    },

    /// A count parameter (steps, samples) was configured as zero
    #[error("count for `{field}` must be greater than zero")]
    ZeroCount {
        /// Name of the offending configuration field
        field: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroDuration { field } => defmt::write!(fmt, "zero duration: {}", field),
            Self::InvalidThreshold { field } => defmt::write!(fmt, "bad threshold: {}", field),
            Self::ZeroCount { field } => defmt::write!(fmt, "zero count: {}", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_small_and_copy() {
        // Errors travel through constructors; keep them pointer-sized-ish
        assert!(core::mem::size_of::<ConfigError>() <= 24);

        let e = ConfigError::ZeroDuration { field: "window_ms" };
        let e2 = e; // Copy
        assert_eq!(e, e2);
    }
}
