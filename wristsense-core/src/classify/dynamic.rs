//! Dynamic-Activity Sub-Classification
//!
//! ## Overview
//!
//! Refines "the wearer is moving" into walking, running, climbing or
//! stationary exercise using four independent input streams:
//!
//! - **step timestamps** - cadence over a 60 s window (the window length
//!   makes the retained count *be* steps/minute);
//! - **barometric pressure** - short-horizon (6 s) altitude change;
//! - **linear acceleration** - 5 s signal-magnitude-area (SMA) as a
//!   movement-intensity proxy;
//! - **heart rate** - latest value only.
//!
//! ## Priority Order
//!
//! Evaluated on every stream update, first match wins:
//!
//! 1. cadence ≥ 150 spm → Running
//! 2. altitude gain > 0.5 m over 6 s with ≥ 3 steps → Climbing
//! 3. cadence < 60 spm, SMA > 2.5 m/s², HR > 100 bpm → Exercising
//! 4. otherwise → Walking
//!
//! The classifier is edge-triggered: update methods return `Some` only when
//! the refined activity *changes*, never re-emitting an unchanged state.

use crate::{
    buffer::ScalarRing,
    classify::barometric_altitude_m,
    constants::motion::{
        CADENCE_WINDOW_MS, CLIMB_ALT_GAIN_M, CLIMB_MIN_STEPS, CLIMB_WINDOW_MS,
        EXERCISE_CADENCE_MAX_SPM, EXERCISE_HR_MIN_BPM, EXERCISE_SMA_MIN_M_PER_S2, RUNNING_CADENCE_SPM,
        SMA_WINDOW_MS,
    },
    errors::{ConfigError, ConfigResult},
    events::DynamicActivity,
    time::Timestamp,
};

/// Step-timestamp capacity: covers 60 s at well above running cadence
const STEP_CAPACITY: usize = 256;
/// Altitude capacity: 6 s of barometer samples with headroom
const ALTITUDE_CAPACITY: usize = 64;
/// SMA capacity: 5 s at 25 Hz with headroom
const SMA_CAPACITY: usize = 128;

/// Dynamic-classification parameters
#[derive(Debug, Clone, Copy)]
pub struct DynamicConfig {
    /// Cadence window (ms)
    pub cadence_window_ms: u64,
    /// Climbing check horizon (ms)
    pub climb_window_ms: u64,
    /// SMA window (ms)
    pub sma_window_ms: u64,
    /// Running cadence threshold (steps/min)
    pub running_cadence_spm: f32,
    /// Climbing altitude gain threshold (m)
    pub climb_alt_gain_m: f32,
    /// Minimum steps inside the climb horizon
    pub climb_min_steps: usize,
    /// Exercise cadence ceiling (steps/min)
    pub exercise_cadence_max_spm: f32,
    /// Exercise SMA floor (m/s²)
    pub exercise_sma_min: f32,
    /// Exercise heart-rate floor (bpm)
    pub exercise_hr_min_bpm: f32,
}

impl Default for DynamicConfig {
    fn default() -> Self {
        Self {
            cadence_window_ms: CADENCE_WINDOW_MS,
            climb_window_ms: CLIMB_WINDOW_MS,
            sma_window_ms: SMA_WINDOW_MS,
            running_cadence_spm: RUNNING_CADENCE_SPM,
            climb_alt_gain_m: CLIMB_ALT_GAIN_M,
            climb_min_steps: CLIMB_MIN_STEPS,
            exercise_cadence_max_spm: EXERCISE_CADENCE_MAX_SPM,
            exercise_sma_min: EXERCISE_SMA_MIN_M_PER_S2,
            exercise_hr_min_bpm: EXERCISE_HR_MIN_BPM,
        }
    }
}

impl DynamicConfig {
    /// Reject nonsensical parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cadence_window_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "cadence_window_ms",
            });
        }
        if self.climb_window_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "climb_window_ms",
            });
        }
        if self.sma_window_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "sma_window_ms",
            });
        }
        if self.climb_min_steps == 0 {
            return Err(ConfigError::ZeroCount {
                field: "climb_min_steps",
            });
        }
        Ok(())
    }
}

/// Stateful dynamic-activity classifier
#[derive(Debug, Clone)]
pub struct DynamicClassifier {
    config: DynamicConfig,
    /// Step event timestamps (value unused)
    steps: ScalarRing<STEP_CAPACITY>,
    /// Barometric altitude history (m)
    altitude: ScalarRing<ALTITUDE_CAPACITY>,
    /// Linear-acceleration magnitude history (m/s²)
    movement: ScalarRing<SMA_CAPACITY>,
    latest_hr_bpm: Option<f32>,
    current: Option<DynamicActivity>,
}

impl DynamicClassifier {
    /// Classifier with validated configuration
    pub fn new(config: DynamicConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            steps: ScalarRing::new(),
            altitude: ScalarRing::new(),
            movement: ScalarRing::new(),
            latest_hr_bpm: None,
            current: None,
        })
    }

    /// Record a step event
    ///
    /// Returns `Some` when the refined activity changes.
    pub fn on_step(&mut self, now: Timestamp) -> Option<DynamicActivity> {
        self.steps.push(1.0, now);
        self.reevaluate(now)
    }

    /// Record a barometric pressure reading (hPa)
    pub fn on_pressure(&mut self, now: Timestamp, pressure_hpa: f32) -> Option<DynamicActivity> {
        self.altitude.push(barometric_altitude_m(pressure_hpa), now);
        self.reevaluate(now)
    }

    /// Record a linear-acceleration magnitude (m/s²)
    pub fn on_linear_accel(&mut self, now: Timestamp, magnitude: f32) -> Option<DynamicActivity> {
        self.movement.push(magnitude, now);
        self.reevaluate(now)
    }

    /// Record an instantaneous heart rate (bpm)
    pub fn on_heart_rate(&mut self, now: Timestamp, bpm: f32) -> Option<DynamicActivity> {
        self.latest_hr_bpm = Some(bpm);
        self.reevaluate(now)
    }

    /// Most recent refined activity, if any stream update has occurred
    pub fn current(&self) -> Option<DynamicActivity> {
        self.current
    }

    /// Cadence over the 60 s window (steps/min by window choice)
    pub fn cadence_spm(&self, now: Timestamp) -> f32 {
        let cutoff = now.saturating_sub(self.config.cadence_window_ms);
        self.steps.count_since(cutoff) as f32
    }

    /// Re-run the priority rules and report a change, if any
    fn reevaluate(&mut self, now: Timestamp) -> Option<DynamicActivity> {
        let next = self.classify(now);
        if Some(next) != self.current {
            self.current = Some(next);
            #[cfg(feature = "std")]
            log::debug!("dynamic activity -> {} at t={now}", next.name());
            Some(next)
        } else {
            None
        }
    }

    fn classify(&self, now: Timestamp) -> DynamicActivity {
        let cadence = self.cadence_spm(now);
        if cadence >= self.config.running_cadence_spm {
            return DynamicActivity::Running;
        }

        let climb_cutoff = now.saturating_sub(self.config.climb_window_ms);
        let alt_gain = match (
            self.altitude.oldest_since(climb_cutoff),
            self.altitude.newest(),
        ) {
            (Some(oldest), Some(newest)) => newest.value - oldest.value,
            _ => 0.0,
        };
        let recent_steps = self.steps.count_since(climb_cutoff);
        if alt_gain > self.config.climb_alt_gain_m && recent_steps >= self.config.climb_min_steps {
            return DynamicActivity::Climbing;
        }

        // SMA is meaningful only once the movement ring has a full
        // window of history
        let sma = if self.movement.is_full() {
            let sma_cutoff = now.saturating_sub(self.config.sma_window_ms);
            self.movement.mean_since(sma_cutoff).unwrap_or(0.0)
        } else {
            0.0
        };
        let hr = self.latest_hr_bpm.unwrap_or(0.0);
        if cadence < self.config.exercise_cadence_max_spm
            && sma > self.config.exercise_sma_min
            && hr > self.config.exercise_hr_min_bpm
        {
            return DynamicActivity::Exercising;
        }

        DynamicActivity::Walking
    }
}

impl Default for DynamicClassifier {
    fn default() -> Self {
        Self {
            config: DynamicConfig::default(),
            steps: ScalarRing::new(),
            altitude: ScalarRing::new(),
            movement: ScalarRing::new(),
            latest_hr_bpm: None,
            current: None,
        }
    }
}
