//! Data Model for the Classification Pipeline
//!
//! ## Overview
//!
//! This module defines the record types that flow through the engine:
//! raw [`SensorSample`]s pushed by the ingestion collaborator, derived
//! per-instant [`Tick`]s, ephemeral [`AggregateWindow`] summaries, and the
//! tagged unions describing what the wearer is doing.
//!
//! ## Design Philosophy
//!
//! All types here are small, `Copy` where practical, and stack-allocated.
//! Samples arrive at sensor-native, irregular rates; every record carries
//! its own monotonic millisecond timestamp so downstream windows can be
//! computed from wall-clock deltas rather than sample counts.
//!
//! ### Candidate vs. confirmed
//!
//! Sub-classifier outputs ([`DynamicActivity`], [`Posture`], sleep flags)
//! are *candidates*. Exactly one [`ActivityState`] is confirmed at a time,
//! and only the top-level hysteresis machine promotes candidates to the
//! confirmed state.

use crate::time::Timestamp;

/// One instant of raw sensor data
///
/// Produced by the sensor-ingestion collaborator; immutable once created.
/// Optional channels are `None` when the underlying sensor did not report
/// in this instant - classifiers tolerate arbitrarily sparse channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    /// Monotonic timestamp in milliseconds
    pub timestamp: Timestamp,
    /// 3-axis acceleration including gravity (m/s²)
    pub accel: [f32; 3],
    /// 3-axis angular velocity (rad/s)
    pub gyro: [f32; 3],
    /// Barometric pressure (hPa), if the barometer reported
    pub pressure_hpa: Option<f32>,
    /// Raw PPG channel value, if the optical sensor reported
    pub ppg: Option<f32>,
    /// Instantaneous heart rate (bpm), if available
    pub heart_rate_bpm: Option<f32>,
    /// True if the hardware step detector fired at this instant
    pub step_event: bool,
}

impl SensorSample {
    /// Sample carrying only accelerometer and gyroscope data
    pub const fn accel_gyro(timestamp: Timestamp, accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self {
            timestamp,
            accel,
            gyro,
            pressure_hpa: None,
            ppg: None,
            heart_rate_bpm: None,
            step_event: false,
        }
    }

    /// Attach a barometric pressure reading
    pub const fn with_pressure(mut self, hpa: f32) -> Self {
        self.pressure_hpa = Some(hpa);
        self
    }

    /// Attach a heart-rate reading
    pub const fn with_heart_rate(mut self, bpm: f32) -> Self {
        self.heart_rate_bpm = Some(bpm);
        self
    }

    /// Mark this instant as carrying a step event
    pub const fn with_step(mut self) -> Self {
        self.step_event = true;
        self
    }

    /// Magnitude of the acceleration vector (m/s²)
    pub fn accel_magnitude(&self) -> f32 {
        let [ax, ay, az] = self.accel;
        libm::sqrtf(ax * ax + ay * ay + az * az)
    }
}

/// One classified instant derived from a [`SensorSample`]
///
/// Owned exclusively by the window aggregator's ring; evicted once older
/// than the aggregation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Timestamp of the originating sample
    pub timestamp: Timestamp,
    /// Movement flag: gyro RMS or acceleration deviation over threshold
    pub is_dynamic: bool,
    /// At rest inside one of the recognized posture bands
    pub is_static: bool,
    /// Pitch angle (degrees)
    pub pitch_deg: f32,
    /// Roll angle (degrees)
    pub roll_deg: f32,
    /// Combined gyroscope magnitude (rad/s)
    pub gyro_rms: f32,
    /// Step event carried through from the sample
    pub step_event: bool,
    /// Barometric altitude (m), if pressure was available
    pub altitude_m: Option<f32>,
}

/// Ephemeral summary of the aggregation window
///
/// Recomputed on every feed; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateWindow {
    /// Ticks currently retained in the window
    pub count: usize,
    /// Fraction of retained ticks flagged dynamic
    pub dynamic_ratio: f32,
    /// Fraction of retained ticks flagged static
    pub static_ratio: f32,
}

impl AggregateWindow {
    /// Majority-vote candidate category for this window
    pub fn category(&self) -> WindowCategory {
        use crate::constants::motion::{DYNAMIC_RATIO_THRESHOLD, STATIC_RATIO_THRESHOLD};

        if self.dynamic_ratio > DYNAMIC_RATIO_THRESHOLD {
            WindowCategory::Dynamic
        } else if self.static_ratio > STATIC_RATIO_THRESHOLD {
            WindowCategory::Static
        } else {
            WindowCategory::Transient
        }
    }
}

/// Coarse candidate category from the window aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WindowCategory {
    /// Majority of ticks show movement
    Dynamic = 0,
    /// Majority of ticks are at rest in a posture band
    Static = 1,
    /// No clear majority
    Transient = 2,
}

/// Refined activity while the wearer is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DynamicActivity {
    /// Cadence at running pace
    Running = 0,
    /// Short-horizon altitude gain with steps
    Climbing = 1,
    /// High movement intensity and heart rate at low cadence
    Exercising = 2,
    /// Default moving state
    Walking = 3,
}

impl DynamicActivity {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            DynamicActivity::Running => "running",
            DynamicActivity::Climbing => "climbing",
            DynamicActivity::Exercising => "exercising",
            DynamicActivity::Walking => "walking",
        }
    }
}

/// Body posture while at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Posture {
    /// Horizontal, tilt near zero
    Lying = 0,
    /// Intermediate tilt
    Sitting = 1,
    /// Upright
    Standing = 2,
    /// Tilt outside all recognized bands, or classifier disabled
    Unknown = 3,
}

impl Posture {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Posture::Lying => "lying",
            Posture::Sitting => "sitting",
            Posture::Standing => "standing",
            Posture::Unknown => "unknown",
        }
    }
}

/// Top-level emitted activity state
///
/// Exactly one value is current at any time; transitions are governed by
/// the hysteresis state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ActivityState {
    /// Confirmed stair ascent
    StairUp = 0,
    /// Running
    Running = 1,
    /// Walking
    Walking = 2,
    /// Stationary exercise
    Exercise = 3,
    /// Moving, but no refined sub-state available
    DynamicGeneric = 4,
    /// Seated
    Sitting = 5,
    /// Upright at rest
    Standing = 6,
    /// Horizontal at rest
    Lying = 7,
    /// Asleep
    Sleeping = 8,
    /// Between states, or insufficient evidence
    Transient = 9,
}

impl ActivityState {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            ActivityState::StairUp => "stair_up",
            ActivityState::Running => "running",
            ActivityState::Walking => "walking",
            ActivityState::Exercise => "exercise",
            ActivityState::DynamicGeneric => "dynamic",
            ActivityState::Sitting => "sitting",
            ActivityState::Standing => "standing",
            ActivityState::Lying => "lying",
            ActivityState::Sleeping => "sleeping",
            ActivityState::Transient => "transient",
        }
    }

    /// True if this state represents movement
    pub const fn is_dynamic(&self) -> bool {
        matches!(
            self,
            ActivityState::StairUp
                | ActivityState::Running
                | ActivityState::Walking
                | ActivityState::Exercise
                | ActivityState::DynamicGeneric
        )
    }
}

impl From<DynamicActivity> for ActivityState {
    fn from(activity: DynamicActivity) -> Self {
        match activity {
            DynamicActivity::Running => ActivityState::Running,
            DynamicActivity::Climbing => ActivityState::StairUp,
            DynamicActivity::Exercising => ActivityState::Exercise,
            DynamicActivity::Walking => ActivityState::Walking,
        }
    }
}

impl From<Posture> for ActivityState {
    fn from(posture: Posture) -> Self {
        match posture {
            Posture::Lying => ActivityState::Lying,
            Posture::Sitting => ActivityState::Sitting,
            Posture::Standing => ActivityState::Standing,
            Posture::Unknown => ActivityState::Transient,
        }
    }
}
