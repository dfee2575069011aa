//! Stair-Climb Detection from Barometric Altitude and Step Gating
//!
//! ## Overview
//!
//! Confirms a floor climbed when altitude rises by a full floor height
//! *while* enough step events arrive within a short window. Both gates are
//! required:
//!
//! - altitude alone would count elevator rides and weather drift;
//! - steps alone would count flat walking.
//!
//! The reference altitude is re-anchored whenever the window times out or
//! altitude dips below the reference, so slow drifts and descents can never
//! accumulate toward a false confirmation.
//!
//! The detector expects *smoothed* altitude; consumer barometers jitter by
//! close to a meter raw. [`crate::monitor::ActivityMonitor`] feeds it an
//! EMA-filtered altitude.

use crate::{
    constants::stairs::{FLOOR_HEIGHT_M, MIN_STEPS_PER_FLOOR, STAIR_WINDOW_MS},
    errors::{ConfigError, ConfigResult},
    time::{elapsed_ms, Timestamp},
};

/// Stair detection parameters
#[derive(Debug, Clone, Copy)]
pub struct StairConfig {
    /// Altitude gain that confirms one floor (m)
    pub floor_height_m: f32,
    /// Minimum step events alongside the altitude gain
    pub min_steps: u32,
    /// Maximum reference age before re-anchoring (ms)
    pub window_ms: u64,
}

impl Default for StairConfig {
    fn default() -> Self {
        Self {
            floor_height_m: FLOOR_HEIGHT_M,
            min_steps: MIN_STEPS_PER_FLOOR,
            window_ms: STAIR_WINDOW_MS,
        }
    }
}

impl StairConfig {
    /// Reject nonsensical parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if self.floor_height_m <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                field: "floor_height_m",
            });
        }
        if self.min_steps == 0 {
            return Err(ConfigError::ZeroCount { field: "min_steps" });
        }
        if self.window_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "window_ms" });
        }
        Ok(())
    }
}

/// Internal counter state: reference anchor plus accumulation
#[derive(Debug, Clone, Copy)]
struct StairCounter {
    reference_altitude_m: f32,
    window_start: Timestamp,
    steps: u32,
}

/// Stateful stair-ascent detector
#[derive(Debug, Clone)]
pub struct StairUpDetector {
    config: StairConfig,
    counter: Option<StairCounter>,
    floors_today: u32,
}

impl StairUpDetector {
    /// Detector with validated configuration
    pub fn new(config: StairConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            counter: None,
            floors_today: 0,
        })
    }

    /// Feed one tick of (timestamp, smoothed altitude, step flag)
    ///
    /// Returns `true` only on the tick where a floor climb is confirmed.
    pub fn update(&mut self, now: Timestamp, altitude_m: f32, step_event: bool) -> bool {
        let counter = match &mut self.counter {
            Some(c) => c,
            None => {
                // First call or post-reset: anchor here
                self.counter = Some(StairCounter {
                    reference_altitude_m: altitude_m,
                    window_start: now,
                    steps: 0,
                });
                return false;
            }
        };

        if step_event {
            counter.steps += 1;

            let climbed = altitude_m - counter.reference_altitude_m;
            if climbed >= self.config.floor_height_m && counter.steps >= self.config.min_steps {
                self.floors_today += 1;
                #[cfg(feature = "std")]
                log::debug!(
                    "floor climb confirmed at t={now} (total today: {})",
                    self.floors_today
                );

                // Re-anchor at the confirmed level; climbing continues
                // from here toward the next floor
                *counter = StairCounter {
                    reference_altitude_m: altitude_m,
                    window_start: now,
                    steps: 0,
                };
                return true;
            }
        }

        // Timeout or descent invalidates the current reference
        let expired = elapsed_ms(counter.window_start, now) > self.config.window_ms;
        let descending = altitude_m < counter.reference_altitude_m;
        if expired || descending {
            *counter = StairCounter {
                reference_altitude_m: altitude_m,
                window_start: now,
                steps: 0,
            };
        }

        false
    }

    /// Cumulative confirmed floors since the last daily reset
    pub fn floors_today(&self) -> u32 {
        self.floors_today
    }

    /// Zero the cumulative counter; the caller invokes this at day
    /// boundaries
    pub fn reset_daily_count(&mut self) {
        self.floors_today = 0;
    }
}

impl Default for StairUpDetector {
    fn default() -> Self {
        Self {
            config: StairConfig::default(),
            counter: None,
            floors_today: 0,
        }
    }
}
