//! Static Posture Classification with Confirmation Delay
//!
//! ## Overview
//!
//! While the wearer is at rest, classifies body posture from the device
//! tilt angle: `tilt = degrees(acos(az / |a|))`, 0° lying flat, 90°
//! upright. Tilt thresholds produce a *candidate* posture; a
//! confirmation-delay state machine requires the same candidate to persist
//! continuously for 7 s before it becomes the confirmed posture.
//!
//! The confirmed posture is sticky: once held, momentary candidate flicker
//! cannot dislodge it - only a *different* candidate completing its own
//! 7 s hold. Any candidate change mid-delay restarts the timer from zero.
//!
//! ## Auxiliary History
//!
//! Three independent 5 s rings (linear-acceleration magnitude, heart rate,
//! PPG green) are maintained alongside. Classification currently uses only
//! the latest acceleration sample's tilt; the rings carry refinement
//! signals for downstream consumers and future rules.

use crate::{
    buffer::ScalarRing,
    constants::posture::{
        LYING_TILT_MAX_DEG, POSTURE_ENTRY_DELAY_MS, SITTING_TILT_MAX_DEG, STANDING_TILT_MAX_DEG,
    },
    errors::{ConfigError, ConfigResult},
    events::Posture,
    time::{elapsed_ms, Timestamp},
};

/// Auxiliary ring capacity: 5 s at 25 Hz with headroom
const HISTORY_CAPACITY: usize = 128;

/// Radians-to-degrees conversion factor
const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Static-posture parameters
#[derive(Debug, Clone, Copy)]
pub struct StaticConfig {
    /// Tilt ceiling for the lying candidate (degrees)
    pub lying_tilt_max_deg: f32,
    /// Tilt ceiling for the sitting candidate (degrees)
    pub sitting_tilt_max_deg: f32,
    /// Tilt ceiling for the standing candidate (degrees)
    pub standing_tilt_max_deg: f32,
    /// Continuous hold before a candidate is confirmed (ms)
    pub entry_delay_ms: u64,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            lying_tilt_max_deg: LYING_TILT_MAX_DEG,
            sitting_tilt_max_deg: SITTING_TILT_MAX_DEG,
            standing_tilt_max_deg: STANDING_TILT_MAX_DEG,
            entry_delay_ms: POSTURE_ENTRY_DELAY_MS,
        }
    }
}

impl StaticConfig {
    /// Reject nonsensical parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if self.entry_delay_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "entry_delay_ms",
            });
        }
        let ordered = self.lying_tilt_max_deg < self.sitting_tilt_max_deg
            && self.sitting_tilt_max_deg < self.standing_tilt_max_deg;
        if !ordered {
            return Err(ConfigError::InvalidThreshold {
                field: "tilt thresholds must be strictly increasing",
            });
        }
        Ok(())
    }
}

/// Stateful posture classifier with confirmation delay
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    config: StaticConfig,
    enabled: bool,
    confirmed: Posture,
    candidate: Option<Posture>,
    candidate_since: Timestamp,
    /// Linear-acceleration magnitude history (m/s²)
    movement: ScalarRing<HISTORY_CAPACITY>,
    /// Heart-rate history (bpm)
    heart_rate: ScalarRing<HISTORY_CAPACITY>,
    /// PPG green-channel history
    ppg: ScalarRing<HISTORY_CAPACITY>,
}

impl StaticClassifier {
    /// Classifier with validated configuration
    pub fn new(config: StaticConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Feed one raw (gravity-inclusive) acceleration sample
    ///
    /// Returns `Some` when a new posture completes its hold and becomes
    /// confirmed.
    pub fn on_accel(&mut self, now: Timestamp, accel: [f32; 3]) -> Option<Posture> {
        if !self.enabled {
            return None;
        }

        let candidate = self.candidate_from_tilt(tilt_deg(accel));

        match self.candidate {
            Some(current) if current == candidate => {
                // Unbroken run of the same candidate
                if candidate != self.confirmed
                    && elapsed_ms(self.candidate_since, now) >= self.config.entry_delay_ms
                {
                    self.confirmed = candidate;
                    #[cfg(feature = "std")]
                    log::debug!("posture confirmed: {} at t={now}", candidate.name());
                    return Some(candidate);
                }
            }
            _ => {
                // New candidate: restart the hold from zero
                self.candidate = Some(candidate);
                self.candidate_since = now;
            }
        }

        None
    }

    /// Feed a linear-acceleration magnitude into the auxiliary ring
    pub fn on_movement(&mut self, now: Timestamp, magnitude: f32) {
        if self.enabled {
            self.movement.push(magnitude, now);
        }
    }

    /// Feed a heart-rate reading into the auxiliary ring
    pub fn on_heart_rate(&mut self, now: Timestamp, bpm: f32) {
        if self.enabled {
            self.heart_rate.push(bpm, now);
        }
    }

    /// Feed a PPG green-channel reading into the auxiliary ring
    pub fn on_ppg(&mut self, now: Timestamp, value: f32) {
        if self.enabled {
            self.ppg.push(value, now);
        }
    }

    /// Currently confirmed posture
    pub fn confirmed(&self) -> Posture {
        self.confirmed
    }

    /// Enable or disable the classifier
    ///
    /// Disabling resets immediately: confirmed posture to Unknown, hold
    /// timer and history rings cleared.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.confirmed = Posture::Unknown;
            self.candidate = None;
            self.candidate_since = 0;
            self.movement.clear();
            self.heart_rate.clear();
            self.ppg.clear();
        }
        self.enabled = enabled;
    }

    fn candidate_from_tilt(&self, tilt: f32) -> Posture {
        if tilt < self.config.lying_tilt_max_deg {
            Posture::Lying
        } else if tilt < self.config.sitting_tilt_max_deg {
            Posture::Sitting
        } else if tilt <= self.config.standing_tilt_max_deg {
            Posture::Standing
        } else {
            Posture::Unknown
        }
    }
}

impl Default for StaticClassifier {
    fn default() -> Self {
        Self {
            config: StaticConfig::default(),
            enabled: true,
            confirmed: Posture::Unknown,
            candidate: None,
            candidate_since: 0,
            movement: ScalarRing::new(),
            heart_rate: ScalarRing::new(),
            ppg: ScalarRing::new(),
        }
    }
}

/// Tilt angle from the device z-axis (degrees)
///
/// 0° when flat (gravity along +z), 90° when upright. Degenerate
/// zero-magnitude input maps to 0°.
fn tilt_deg(accel: [f32; 3]) -> f32 {
    let [ax, ay, az] = accel;
    let mag = libm::sqrtf(ax * ax + ay * ay + az * az);
    if mag <= f32::EPSILON {
        return 0.0;
    }
    let cos = (az / mag).clamp(-1.0, 1.0);
    libm::acosf(cos) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Acceleration vector at a given tilt from vertical
    fn accel_at_tilt(tilt_deg: f32) -> [f32; 3] {
        let rad = tilt_deg / RAD_TO_DEG;
        [9.81 * libm::sinf(rad), 0.0, 9.81 * libm::cosf(rad)]
    }

    #[test]
    fn tilt_angle_bounds() {
        assert!(tilt_deg([0.0, 0.0, 9.81]).abs() < 1e-3);
        assert!((tilt_deg([9.81, 0.0, 0.0]) - 90.0).abs() < 1e-3);
        assert!((tilt_deg([0.0, 0.0, -9.81]) - 180.0).abs() < 1e-3);
        assert_eq!(tilt_deg([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn candidate_needs_full_hold_to_confirm() {
        let mut c = StaticClassifier::default();
        let upright = accel_at_tilt(80.0);

        // 6.9 s of the same candidate: not confirmed yet
        for i in 0..70u64 {
            assert_eq!(c.on_accel(i * 100, upright), None);
        }
        assert_eq!(c.confirmed(), Posture::Unknown);

        // Crossing the 7 s mark confirms
        let confirmed = c.on_accel(7000, upright);
        assert_eq!(confirmed, Some(Posture::Standing));
        assert_eq!(c.confirmed(), Posture::Standing);
    }

    #[test]
    fn candidate_change_restarts_hold() {
        let mut c = StaticClassifier::default();

        // 5 s toward Sitting...
        for i in 0..50u64 {
            c.on_accel(i * 100, accel_at_tilt(45.0));
        }
        // ...interrupted by one Lying sample
        c.on_accel(5100, accel_at_tilt(10.0));

        // Another 5 s of Sitting is not enough - timer restarted
        for i in 0..50u64 {
            c.on_accel(5200 + i * 100, accel_at_tilt(45.0));
        }
        assert_eq!(c.confirmed(), Posture::Unknown);

        // Completing a fresh 7 s run confirms
        let confirmed = c.on_accel(5200 + 7000, accel_at_tilt(45.0));
        assert_eq!(confirmed, Some(Posture::Sitting));
    }

    #[test]
    fn confirmed_posture_is_sticky() {
        let mut c = StaticClassifier::default();

        for i in 0..=70u64 {
            c.on_accel(i * 100, accel_at_tilt(45.0));
        }
        assert_eq!(c.confirmed(), Posture::Sitting);

        // Brief flicker toward Lying never dislodges the confirmed state
        for i in 0..30u64 {
            c.on_accel(7200 + i * 100, accel_at_tilt(10.0));
        }
        assert_eq!(c.confirmed(), Posture::Sitting);

        // A full hold of the new candidate finally replaces it
        let confirmed = c.on_accel(7200 + 7000, accel_at_tilt(10.0));
        assert_eq!(confirmed, Some(Posture::Lying));
    }

    #[test]
    fn inverted_device_is_unknown_candidate() {
        let mut c = StaticClassifier::default();

        // Tilt past 120°: Unknown candidate; confirmed stays Unknown and
        // nothing is ever emitted (candidate equals confirmed)
        for i in 0..=80u64 {
            assert_eq!(c.on_accel(i * 100, accel_at_tilt(150.0)), None);
        }
        assert_eq!(c.confirmed(), Posture::Unknown);
    }

    #[test]
    fn disable_resets_immediately() {
        let mut c = StaticClassifier::default();

        for i in 0..=70u64 {
            c.on_accel(i * 100, accel_at_tilt(80.0));
        }
        assert_eq!(c.confirmed(), Posture::Standing);

        c.set_enabled(false);
        assert_eq!(c.confirmed(), Posture::Unknown);

        // Disabled classifier ignores input
        assert_eq!(c.on_accel(8000, accel_at_tilt(80.0)), None);
        assert_eq!(c.confirmed(), Posture::Unknown);
    }

    #[test]
    fn reenabling_starts_a_fresh_hold() {
        let mut c = StaticClassifier::default();

        for i in 0..=70u64 {
            c.on_accel(i * 100, accel_at_tilt(80.0));
        }
        c.set_enabled(false);
        c.set_enabled(true);

        // Needs a full 7 s again after re-enable
        for i in 0..=69u64 {
            c.on_accel(10_000 + i * 100, accel_at_tilt(80.0));
        }
        assert_eq!(c.confirmed(), Posture::Unknown);
        assert_eq!(
            c.on_accel(17_000, accel_at_tilt(80.0)),
            Some(Posture::Standing)
        );
    }

    #[test]
    fn invalid_config_rejected() {
        let bad = StaticConfig {
            entry_delay_ms: 0,
            ..StaticConfig::default()
        };
        assert!(StaticClassifier::new(bad).is_err());

        let unordered = StaticConfig {
            lying_tilt_max_deg: 70.0,
            sitting_tilt_max_deg: 65.0,
            ..StaticConfig::default()
        };
        assert!(StaticClassifier::new(unordered).is_err());
    }
}
