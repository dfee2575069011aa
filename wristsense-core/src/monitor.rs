//! Top-Level Activity Monitor
//!
//! ## Overview
//!
//! [`ActivityMonitor`] wires the whole stack together behind one call:
//! [`process`](ActivityMonitor::process) takes a raw [`SensorSample`] and
//! returns the debounced [`ActivityState`]. Internally it
//!
//! 1. classifies the sample into a [`crate::events::Tick`],
//! 2. feeds the tick to the window aggregator,
//! 3. fans the sample's channels out to the sub-classifiers (stairs,
//!    dynamic, posture, sleep),
//! 4. resolves a detailed candidate from the window category,
//! 5. runs the candidate through the hysteresis gate.
//!
//! One monitor serves one sensor feed. Calls must be serialized; the
//! monitor holds no locks of its own.
//!
//! Barometric altitude is smoothed with a small EMA before reaching the
//! stair detector, which expects stable input (raw consumer barometers
//! jitter by close to a meter).

use crate::{
    classify::{
        barometric_altitude_m, DynamicClassifier, HysteresisStateMachine, SleepDetector,
        StairUpDetector, StaticClassifier, TickClassifier, WindowAggregator,
    },
    constants::physics::{ALTITUDE_EMA_ALPHA, GRAVITY_M_PER_S2},
    events::{ActivityState, DynamicActivity, Posture, SensorSample, WindowCategory},
};

/// Composed classification pipeline over one sensor feed
#[derive(Debug, Clone, Default)]
pub struct ActivityMonitor {
    tick: TickClassifier,
    aggregator: WindowAggregator,
    stairs: StairUpDetector,
    dynamic: DynamicClassifier,
    posture: StaticClassifier,
    sleep: SleepDetector,
    hysteresis: HysteresisStateMachine,
    /// EMA-smoothed barometric altitude (m)
    smoothed_altitude_m: Option<f32>,
    /// True on the tick where a floor climb was confirmed
    stair_confirmed: bool,
}

impl ActivityMonitor {
    /// Monitor with default configuration throughout
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one sample and return the debounced activity state
    pub fn process(&mut self, sample: &SensorSample) -> ActivityState {
        let now = sample.timestamp;
        let tick = self.tick.classify(sample);
        let window = self.aggregator.feed(tick);

        // Movement intensity as deviation from gravity
        let linear_mag = (sample.accel_magnitude() - GRAVITY_M_PER_S2).abs();

        self.stair_confirmed = false;
        if let Some(hpa) = sample.pressure_hpa {
            let altitude = self.smooth_altitude(barometric_altitude_m(hpa));
            self.stair_confirmed = self.stairs.update(now, altitude, sample.step_event);
            self.dynamic.on_pressure(now, hpa);
        } else if sample.step_event {
            if let Some(altitude) = self.smoothed_altitude_m {
                // Step without a fresh pressure reading still advances the
                // stair window against the last smoothed altitude
                self.stair_confirmed = self.stairs.update(now, altitude, true);
            }
        }

        if sample.step_event {
            self.dynamic.on_step(now);
        }
        self.dynamic.on_linear_accel(now, linear_mag);

        self.posture.on_accel(now, sample.accel);
        self.posture.on_movement(now, linear_mag);
        if let Some(ppg) = sample.ppg {
            self.posture.on_ppg(now, ppg);
        }

        self.sleep.on_movement(now, linear_mag);
        if let Some(bpm) = sample.heart_rate_bpm {
            self.dynamic.on_heart_rate(now, bpm);
            self.posture.on_heart_rate(now, bpm);
            self.sleep.on_heart_rate(now, bpm);
        }

        let detailed = self.resolve(window.category());
        self.hysteresis.update(now, detailed)
    }

    /// Currently emitted (debounced) state
    pub fn current_state(&self) -> ActivityState {
        self.hysteresis.current()
    }

    /// Confirmed static posture
    pub fn posture(&self) -> Posture {
        self.posture.confirmed()
    }

    /// Most recent refined dynamic activity
    pub fn dynamic_activity(&self) -> Option<DynamicActivity> {
        self.dynamic.current()
    }

    /// Whether the sleep detector currently declares sleep
    pub fn is_sleeping(&self) -> bool {
        self.sleep.is_sleeping()
    }

    /// Confirmed floors climbed since the last daily reset
    pub fn floors_climbed(&self) -> u32 {
        self.stairs.floors_today()
    }

    /// Zero the daily floor counter
    pub fn reset_daily_counters(&mut self) {
        self.stairs.reset_daily_count();
    }

    /// Detailed candidate from the current window category
    fn resolve(&self, category: WindowCategory) -> ActivityState {
        match category {
            WindowCategory::Dynamic => {
                if self.stair_confirmed {
                    ActivityState::StairUp
                } else {
                    self.dynamic
                        .current()
                        .map(ActivityState::from)
                        .unwrap_or(ActivityState::DynamicGeneric)
                }
            }
            WindowCategory::Static => {
                if self.sleep.is_sleeping() {
                    ActivityState::Sleeping
                } else {
                    ActivityState::from(self.posture.confirmed())
                }
            }
            WindowCategory::Transient => ActivityState::Transient,
        }
    }

    fn smooth_altitude(&mut self, raw_m: f32) -> f32 {
        let smoothed = match self.smoothed_altitude_m {
            Some(prev) => prev + ALTITUDE_EMA_ALPHA * (raw_m - prev),
            None => raw_m,
        };
        self.smoothed_altitude_m = Some(smoothed);
        smoothed
    }
}
