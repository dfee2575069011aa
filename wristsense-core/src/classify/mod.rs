//! Activity and Posture Classifiers
//!
//! ## Overview
//!
//! The classification stack, leaves first:
//!
//! ```text
//! SensorSample → TickClassifier → WindowAggregator ──┐
//!        │                                           ↓
//!        ├─→ StairUpDetector                HysteresisStateMachine → ActivityState
//!        ├─→ DynamicClassifier ─────────────────────↑
//!        ├─→ StaticClassifier ──────────────────────┤
//!        └─→ SleepDetector ─────────────────────────┘
//! ```
//!
//! Every sub-classifier is independently stateful and produces *candidates*;
//! only the hysteresis machine promotes a candidate to the single confirmed
//! [`crate::events::ActivityState`]. Instances never share buffers - running
//! several against the same feed is safe as long as each instance's updates
//! are serialized (one mutex or one actor per instance), because an update
//! reads and writes multiple fields as a unit.

pub mod dynamic;
pub mod hysteresis;
pub mod posture;
pub mod sleep;
pub mod stairs;
pub mod tick;

pub use dynamic::{DynamicClassifier, DynamicConfig};
pub use hysteresis::HysteresisStateMachine;
pub use posture::{StaticClassifier, StaticConfig};
pub use sleep::{SleepConfig, SleepDetector};
pub use stairs::{StairConfig, StairUpDetector};
pub use tick::{TickClassifier, TickConfig, WindowAggregator};

use crate::constants::physics::{
    BAROMETRIC_ALTITUDE_EXPONENT, BAROMETRIC_ALTITUDE_SCALE_M, SEA_LEVEL_PRESSURE_HPA,
};

/// Altitude above the standard-atmosphere reference for a pressure reading
///
/// International barometric formula. Absolute accuracy depends on the
/// actual sea-level pressure of the day, so only *differences* between
/// nearby readings are meaningful to the classifiers.
pub fn barometric_altitude_m(pressure_hpa: f32) -> f32 {
    let ratio = pressure_hpa / SEA_LEVEL_PRESSURE_HPA;
    BAROMETRIC_ALTITUDE_SCALE_M * (1.0 - libm::powf(ratio, BAROMETRIC_ALTITUDE_EXPONENT))
}
