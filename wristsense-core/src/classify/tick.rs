//! Per-Sample Tick Classification and Sliding-Window Aggregation
//!
//! ## Overview
//!
//! [`TickClassifier`] turns one instant of accelerometer + gyroscope data
//! into a [`Tick`]: dynamic/static flags plus orientation. It is a pure
//! function of its input and configuration.
//!
//! [`WindowAggregator`] smooths the noisy per-tick flags with a short
//! wall-clock window (default 2 s) and a 0.6 majority vote. The window is
//! time-bounded, not count-bounded, so irregular sample rates do not skew
//! the vote. The result is deliberately biased toward stability over
//! latency: a single noisy tick cannot flip the candidate category.
//!
//! ## Orientation Convention
//!
//! Pitch and roll follow the usual wrist-device convention:
//! `pitch = atan2(-ax, sqrt(ay² + az²))`, `roll = atan2(ay, az)`, both in
//! degrees. A device lying flat with +z up reads pitch 0, roll 0.

use heapless::Deque;

use crate::{
    classify::barometric_altitude_m,
    constants::{
        motion::{
            ACCEL_DYNAMIC_DELTA_M_PER_S2, AGGREGATION_WINDOW_MS, GYRO_DYNAMIC_THRESHOLD_RAD_PER_S,
        },
        physics::GRAVITY_M_PER_S2,
        posture::{
            LYING_PITCH_MIN_DEG, SITTING_PITCH_MAX_DEG, SITTING_PITCH_MIN_DEG,
            SITTING_ROLL_MAX_DEG, STANDING_PITCH_MAX_DEG,
        },
    },
    errors::{ConfigError, ConfigResult},
    events::{AggregateWindow, SensorSample, Tick},
    time::{elapsed_ms, Timestamp},
};

/// Maximum ticks retained by the aggregation window
///
/// 2 s at a generous 32 Hz IMU rate. If the sensor runs faster the oldest
/// ticks rotate out early, mildly shortening the effective window.
const TICK_CAPACITY: usize = 64;

/// Radians-to-degrees conversion factor
const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Configuration for per-tick classification
#[derive(Debug, Clone, Copy)]
pub struct TickConfig {
    /// Gyro RMS above which a tick is dynamic (rad/s)
    pub gyro_threshold_rad_per_s: f32,
    /// Accel-magnitude deviation from gravity above which a tick is
    /// dynamic (m/s²)
    pub accel_delta_m_per_s2: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            gyro_threshold_rad_per_s: GYRO_DYNAMIC_THRESHOLD_RAD_PER_S,
            accel_delta_m_per_s2: ACCEL_DYNAMIC_DELTA_M_PER_S2,
        }
    }
}

impl TickConfig {
    /// Reject nonsensical thresholds
    pub fn validate(&self) -> ConfigResult<()> {
        if self.gyro_threshold_rad_per_s <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "gyro_threshold_rad_per_s",
            });
        }
        if self.accel_delta_m_per_s2 <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "accel_delta_m_per_s2",
            });
        }
        Ok(())
    }
}

/// Pure per-sample classifier: one [`SensorSample`] in, one [`Tick`] out
#[derive(Debug, Clone, Default)]
pub struct TickClassifier {
    config: TickConfig,
}

impl TickClassifier {
    /// Classifier with validated configuration
    pub fn new(config: TickConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Classify one instant of sensor data
    pub fn classify(&self, sample: &SensorSample) -> Tick {
        let [ax, ay, az] = sample.accel;
        let [gx, gy, gz] = sample.gyro;

        let gyro_rms = libm::sqrtf(gx * gx + gy * gy + gz * gz);
        let acc_mag = sample.accel_magnitude();

        let is_dynamic = gyro_rms > self.config.gyro_threshold_rad_per_s
            || (acc_mag - GRAVITY_M_PER_S2).abs() > self.config.accel_delta_m_per_s2;

        let pitch_deg = libm::atan2f(-ax, libm::sqrtf(ay * ay + az * az)) * RAD_TO_DEG;
        let roll_deg = libm::atan2f(ay, az) * RAD_TO_DEG;

        let is_static = !is_dynamic && in_posture_band(pitch_deg, roll_deg);

        Tick {
            timestamp: sample.timestamp,
            is_dynamic,
            is_static,
            pitch_deg,
            roll_deg,
            gyro_rms,
            step_event: sample.step_event,
            altitude_m: sample.pressure_hpa.map(barometric_altitude_m),
        }
    }
}

/// True if the orientation falls inside any recognized resting band
fn in_posture_band(pitch_deg: f32, roll_deg: f32) -> bool {
    let pitch = pitch_deg.abs();
    let roll = roll_deg.abs();

    let standing = pitch <= STANDING_PITCH_MAX_DEG;
    let sitting = (SITTING_PITCH_MIN_DEG..=SITTING_PITCH_MAX_DEG).contains(&pitch)
        && roll <= SITTING_ROLL_MAX_DEG;
    let lying = pitch >= LYING_PITCH_MIN_DEG;

    standing || sitting || lying
}

/// Time-bounded sliding window over classified ticks
///
/// Owns the only copy of each retained [`Tick`]; entries are evicted once
/// older than the window on every feed.
#[derive(Debug, Clone)]
pub struct WindowAggregator {
    ticks: Deque<Tick, TICK_CAPACITY>,
    window_ms: u64,
}

impl WindowAggregator {
    /// Aggregator with the given wall-clock window
    pub fn new(window_ms: u64) -> ConfigResult<Self> {
        if window_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "window_ms" });
        }
        Ok(Self {
            ticks: Deque::new(),
            window_ms,
        })
    }

    /// Feed one tick and recompute the window summary
    pub fn feed(&mut self, tick: Tick) -> AggregateWindow {
        // Evict by wall clock first, then by capacity
        while let Some(front) = self.ticks.front() {
            if elapsed_ms(front.timestamp, tick.timestamp) > self.window_ms {
                self.ticks.pop_front();
            } else {
                break;
            }
        }

        if self.ticks.is_full() {
            self.ticks.pop_front();
        }
        // Capacity was just ensured; push cannot fail
        let _ = self.ticks.push_back(tick);

        self.summarize()
    }

    /// Current window summary without feeding
    pub fn summarize(&self) -> AggregateWindow {
        let count = self.ticks.len();
        if count == 0 {
            return AggregateWindow {
                count: 0,
                dynamic_ratio: 0.0,
                static_ratio: 0.0,
            };
        }

        let dynamic = self.ticks.iter().filter(|t| t.is_dynamic).count();
        let r#static = self.ticks.iter().filter(|t| t.is_static).count();

        AggregateWindow {
            count,
            dynamic_ratio: dynamic as f32 / count as f32,
            static_ratio: r#static as f32 / count as f32,
        }
    }

    /// Ticks currently retained
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// True if no ticks are retained
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Drop all retained ticks
    pub fn clear(&mut self) {
        self.ticks.clear();
    }
}

impl Default for WindowAggregator {
    fn default() -> Self {
        Self {
            ticks: Deque::new(),
            window_ms: AGGREGATION_WINDOW_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowCategory;

    fn flat_sample(ts: Timestamp) -> SensorSample {
        SensorSample::accel_gyro(ts, [0.0, 0.0, GRAVITY_M_PER_S2], [0.0; 3])
    }

    fn moving_sample(ts: Timestamp) -> SensorSample {
        SensorSample::accel_gyro(ts, [0.0, 0.0, GRAVITY_M_PER_S2], [4.0, 0.0, 0.0])
    }

    #[test]
    fn flat_device_is_static_standing_band() {
        let classifier = TickClassifier::default();
        let tick = classifier.classify(&flat_sample(1000));

        assert!(tick.pitch_deg.abs() < 1e-3);
        assert!(tick.roll_deg.abs() < 1e-3);
        assert!(!tick.is_dynamic);
        assert!(tick.is_static);
        assert!(tick.gyro_rms < 1e-6);
    }

    #[test]
    fn high_gyro_is_dynamic() {
        let classifier = TickClassifier::default();
        let tick = classifier.classify(&moving_sample(1000));

        assert!(tick.is_dynamic);
        assert!(!tick.is_static);
        assert!((tick.gyro_rms - 4.0).abs() < 1e-5);
    }

    #[test]
    fn accel_deviation_is_dynamic() {
        let classifier = TickClassifier::default();
        // Free-fall-ish: magnitude far from gravity
        let sample = SensorSample::accel_gyro(0, [0.0, 0.0, 2.0], [0.0; 3]);
        assert!(classifier.classify(&sample).is_dynamic);
    }

    #[test]
    fn lying_orientation_is_static() {
        let classifier = TickClassifier::default();
        // Gravity along x: pitch ±90°, lying band
        let sample = SensorSample::accel_gyro(0, [GRAVITY_M_PER_S2, 0.0, 0.0], [0.0; 3]);
        let tick = classifier.classify(&sample);

        assert!(tick.pitch_deg.abs() >= LYING_PITCH_MIN_DEG);
        assert!(tick.is_static);
    }

    #[test]
    fn intermediate_tilt_outside_all_bands() {
        let classifier = TickClassifier::default();
        // Pitch ~15°: between standing (≤10°) and sitting (≥20°)
        let pitch_rad = 15.0 / RAD_TO_DEG;
        let ax = -libm::sinf(pitch_rad) * GRAVITY_M_PER_S2;
        let az = libm::cosf(pitch_rad) * GRAVITY_M_PER_S2;
        let tick = classifier.classify(&SensorSample::accel_gyro(0, [ax, 0.0, az], [0.0; 3]));

        assert!(!tick.is_dynamic);
        assert!(!tick.is_static);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = TickConfig {
            gyro_threshold_rad_per_s: -1.0,
            ..TickConfig::default()
        };
        assert!(TickClassifier::new(config).is_err());
    }

    #[test]
    fn aggregator_majority_vote() {
        let classifier = TickClassifier::default();
        let mut agg = WindowAggregator::default();

        // 7 dynamic + 3 static ticks inside one window: 0.7 > 0.6
        for i in 0..7 {
            agg.feed(classifier.classify(&moving_sample(i * 100)));
        }
        for i in 7..10 {
            agg.feed(classifier.classify(&flat_sample(i * 100)));
        }
        let window = agg.summarize();

        assert_eq!(window.count, 10);
        assert!((window.dynamic_ratio - 0.7).abs() < 1e-6);
        assert_eq!(window.category(), WindowCategory::Dynamic);
    }

    #[test]
    fn aggregator_evicts_by_wall_clock() {
        let classifier = TickClassifier::default();
        let mut agg = WindowAggregator::default();

        for i in 0..5 {
            agg.feed(classifier.classify(&moving_sample(i * 100)));
        }
        assert_eq!(agg.len(), 5);

        // A tick 3 s later pushes everything else out of the 2 s window
        let window = agg.feed(classifier.classify(&flat_sample(3400)));
        assert_eq!(window.count, 1);
        assert_eq!(window.static_ratio, 1.0);
    }

    #[test]
    fn aggregator_feed_is_pure_counting() {
        // Feeding an identical tick twice only increments the count;
        // ratios stay fixed because aggregation is pure per-window math
        let classifier = TickClassifier::default();
        let mut agg = WindowAggregator::default();

        let tick = classifier.classify(&moving_sample(1000));
        let first = agg.feed(tick);
        let second = agg.feed(tick);

        assert_eq!(first.count, 1);
        assert_eq!(second.count, 2);
        assert_eq!(first.dynamic_ratio, second.dynamic_ratio);
        assert_eq!(first.static_ratio, second.static_ratio);
    }

    #[test]
    fn no_clear_majority_is_transient() {
        let classifier = TickClassifier::default();
        let mut agg = WindowAggregator::default();

        for i in 0..5 {
            agg.feed(classifier.classify(&moving_sample(i * 100)));
            agg.feed(classifier.classify(&flat_sample(i * 100 + 50)));
        }

        // 50/50 split: neither ratio exceeds 0.6
        assert_eq!(agg.summarize().category(), WindowCategory::Transient);
    }
}
