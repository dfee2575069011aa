//! Sleep Onset and Wake Detection
//!
//! ## Overview
//!
//! Declares sleep when movement and heart rate are *both* persistently low,
//! and wake when either rebounds persistently. Persistence is the whole
//! point: dozing wearers twitch, and a single quiet minute on the couch is
//! not sleep. Entry requires the low condition to hold continuously for
//! 3 min. Exit requires a wake condition (strong movement or elevated
//! heart rate) to hold for 3 min, shortened to 90 s when both wake signals
//! fire simultaneously.
//!
//! Hold timers zero the instant their condition breaks; there is no credit
//! for almost-completed runs.
//!
//! Movement is judged by the mean of a 5 s signal-magnitude-area (SMA)
//! ring, which must be at least 80 % full before entry is considered, so a
//! freshly constructed detector cannot declare sleep off two quiet samples.

use crate::{
    buffer::ScalarRing,
    constants::sleep::{
        SLEEP_ENTRY_HOLD_MS, SLEEP_EXIT_HOLD_FAST_MS, SLEEP_EXIT_HOLD_MS, SLEEP_HR_MAX_BPM,
        SLEEP_SMA_MAX_M_PER_S2, SLEEP_SMA_WINDOW_MS, SMA_READY_RATIO, WAKE_HR_MIN_BPM,
        WAKE_SMA_MIN_M_PER_S2,
    },
    errors::{ConfigError, ConfigResult},
    time::{elapsed_ms, Timestamp},
};

/// SMA ring capacity: 5 s at 25 Hz with headroom
const SMA_CAPACITY: usize = 128;

/// Sleep detection parameters
#[derive(Debug, Clone, Copy)]
pub struct SleepConfig {
    /// SMA ceiling for the sleep-entry condition (m/s²)
    pub sleep_sma_max: f32,
    /// Heart-rate ceiling for the sleep-entry condition (bpm)
    pub sleep_hr_max_bpm: f32,
    /// SMA floor for the strong-movement wake signal (m/s²)
    pub wake_sma_min: f32,
    /// Heart-rate floor for the elevated-HR wake signal (bpm)
    pub wake_hr_min_bpm: f32,
    /// Continuous hold before sleep is entered (ms)
    pub entry_hold_ms: u64,
    /// Continuous hold before sleep is exited (ms)
    pub exit_hold_ms: u64,
    /// Shortened exit hold when both wake signals fire together (ms)
    pub exit_hold_fast_ms: u64,
    /// Lookback for the SMA mean (ms)
    pub sma_window_ms: u64,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            sleep_sma_max: SLEEP_SMA_MAX_M_PER_S2,
            sleep_hr_max_bpm: SLEEP_HR_MAX_BPM,
            wake_sma_min: WAKE_SMA_MIN_M_PER_S2,
            wake_hr_min_bpm: WAKE_HR_MIN_BPM,
            entry_hold_ms: SLEEP_ENTRY_HOLD_MS,
            exit_hold_ms: SLEEP_EXIT_HOLD_MS,
            exit_hold_fast_ms: SLEEP_EXIT_HOLD_FAST_MS,
            sma_window_ms: SLEEP_SMA_WINDOW_MS,
        }
    }
}

impl SleepConfig {
    /// Reject nonsensical parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if self.entry_hold_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "entry_hold_ms",
            });
        }
        if self.exit_hold_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "exit_hold_ms",
            });
        }
        if self.exit_hold_fast_ms > self.exit_hold_ms {
            return Err(ConfigError::InvalidThreshold {
                field: "exit_hold_fast_ms exceeds exit_hold_ms",
            });
        }
        if self.sma_window_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "sma_window_ms",
            });
        }
        Ok(())
    }
}

/// Stateful sleep/wake detector
#[derive(Debug, Clone)]
pub struct SleepDetector {
    config: SleepConfig,
    enabled: bool,
    sleeping: bool,
    sma: ScalarRing<SMA_CAPACITY>,
    latest_hr_bpm: Option<f32>,
    /// Start of the current unbroken entry-condition run
    entry_since: Option<Timestamp>,
    /// Start of the current unbroken exit-condition run
    exit_since: Option<Timestamp>,
    /// Both wake signals observed together during the current exit run
    exit_fast: bool,
}

impl SleepDetector {
    /// Detector with validated configuration
    pub fn new(config: SleepConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Feed one linear-acceleration magnitude sample
    pub fn on_movement(&mut self, now: Timestamp, magnitude: f32) {
        if !self.enabled {
            return;
        }
        self.sma.push(magnitude, now);
        self.evaluate(now);
    }

    /// Feed one heart-rate reading
    pub fn on_heart_rate(&mut self, now: Timestamp, bpm: f32) {
        if !self.enabled {
            return;
        }
        self.latest_hr_bpm = Some(bpm);
        self.evaluate(now);
    }

    /// Whether sleep is currently declared
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Enable or disable the detector
    ///
    /// Disabling clears everything immediately: sleep state, hold timers
    /// and the SMA ring.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.sleeping = false;
            self.sma.clear();
            self.latest_hr_bpm = None;
            self.entry_since = None;
            self.exit_since = None;
            self.exit_fast = false;
        }
        self.enabled = enabled;
    }

    fn evaluate(&mut self, now: Timestamp) {
        if self.sleeping {
            self.evaluate_exit(now);
        } else {
            self.evaluate_entry(now);
        }
    }

    fn evaluate_entry(&mut self, now: Timestamp) {
        // No verdict until the SMA ring has seen enough data
        if self.sma.fill_ratio() < SMA_READY_RATIO {
            self.entry_since = None;
            return;
        }

        let cutoff = now.saturating_sub(self.config.sma_window_ms);
        let quiet = self
            .sma
            .mean_since(cutoff)
            .is_some_and(|mean| mean < self.config.sleep_sma_max);
        let hr_low = self
            .latest_hr_bpm
            .is_some_and(|hr| hr < self.config.sleep_hr_max_bpm);

        if quiet && hr_low {
            let since = *self.entry_since.get_or_insert(now);
            if elapsed_ms(since, now) >= self.config.entry_hold_ms {
                self.sleeping = true;
                self.entry_since = None;
                #[cfg(feature = "std")]
                log::debug!("sleep entered at t={now}");
            }
        } else {
            self.entry_since = None;
        }
    }

    fn evaluate_exit(&mut self, now: Timestamp) {
        let cutoff = now.saturating_sub(self.config.sma_window_ms);
        let strong = self
            .sma
            .mean_since(cutoff)
            .is_some_and(|mean| mean > self.config.wake_sma_min);
        let hr_high = self
            .latest_hr_bpm
            .is_some_and(|hr| hr > self.config.wake_hr_min_bpm);

        if strong || hr_high {
            let since = *self.exit_since.get_or_insert(now);
            if strong && hr_high {
                self.exit_fast = true;
            }
            let hold = if self.exit_fast {
                self.config.exit_hold_fast_ms
            } else {
                self.config.exit_hold_ms
            };
            if elapsed_ms(since, now) >= hold {
                self.sleeping = false;
                self.exit_since = None;
                self.exit_fast = false;
                #[cfg(feature = "std")]
                log::debug!("sleep exited at t={now}");
            }
        } else {
            self.exit_since = None;
            self.exit_fast = false;
        }
    }
}

impl Default for SleepDetector {
    fn default() -> Self {
        Self {
            config: SleepConfig::default(),
            enabled: true,
            sleeping: false,
            sma: ScalarRing::new(),
            latest_hr_bpm: None,
            entry_since: None,
            exit_since: None,
            exit_fast: false,
        }
    }
}
