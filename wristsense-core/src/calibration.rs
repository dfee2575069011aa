//! Per-Wearer Calibration and Rule-Based Posture Refinement
//!
//! ## Overview
//!
//! HRV features vary wildly between wearers; an absolute heart-rate cutoff
//! that separates lying from standing for one person is meaningless for
//! another. Calibration fixes this with explicit sessions: the wearer holds
//! a known posture, [`CalibrationEngine`] accumulates feature vectors under
//! that label, and at session end it derives per-feature mean and standard
//! deviation *pooled across every window of every label collected so far*.
//! Pooling is intentional: the z-scores measure where a fresh window sits
//! relative to the wearer's overall range, not relative to one posture.
//!
//! [`RuleClassifier`] then z-scores three features of a fresh vector
//! (hr_mean, pnn50, kurtosis) against the profile and applies two fixed
//! rules; everything that matches neither falls back to sitting.
//!
//! ## Thresholds Are Constants
//!
//! The engine recomputes mu/sigma on every flush but always writes the
//! same default z-score cutoffs next to them. The cutoffs are never
//! learned from the accumulated windows. Historical behavior, kept as is;
//! a test pins it.
//!
//! ## Persistence
//!
//! Profiles cross session boundaries through a [`ProfileStore`]. A flush
//! computes all statistics first and hands the store one complete profile
//! in a single call, so a concurrently reading rule classifier never
//! observes half-updated statistics.

use heapless::Vec;

use crate::{
    constants::ppg::{
        FEAT_HR_MEAN, FEAT_KURTOSIS, FEAT_PNN50, RULE_HR_Z_MAX, RULE_HR_Z_MIN,
        RULE_KURTOSIS_Z_MIN, RULE_PNN50_Z_MIN,
    },
    events::Posture,
    signal::features::FeatureVector,
};

/// Maximum accumulated feature windows per posture label
pub const WINDOWS_PER_LABEL: usize = 32;

/// Mean and standard deviation of one feature
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussStat {
    /// Pooled mean
    pub mu: f32,
    /// Pooled population standard deviation
    pub sigma: f32,
}

impl GaussStat {
    /// Z-score of a value against this stat; zero when sigma is zero
    pub fn z_score(&self, value: f32) -> f32 {
        if self.sigma == 0.0 {
            0.0
        } else {
            (value - self.mu) / self.sigma
        }
    }
}

/// Fixed z-score cutoffs of the rule engine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleThresholds {
    /// Supine rule: heart-rate z-score ceiling
    pub hr_z_max: f32,
    /// Supine rule: pnn50 z-score floor
    pub pnn50_z_min: f32,
    /// Standing rule: heart-rate z-score floor
    pub hr_z_min: f32,
    /// Standing rule: kurtosis z-score floor
    pub kurtosis_z_min: f32,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            hr_z_max: RULE_HR_Z_MAX,
            pnn50_z_min: RULE_PNN50_Z_MIN,
            hr_z_min: RULE_HR_Z_MIN,
            kurtosis_z_min: RULE_KURTOSIS_Z_MIN,
        }
    }
}

/// Persisted per-wearer calibration state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationProfile {
    /// Feature windows recorded while lying
    pub lying: Vec<FeatureVector, WINDOWS_PER_LABEL>,
    /// Feature windows recorded while sitting
    pub sitting: Vec<FeatureVector, WINDOWS_PER_LABEL>,
    /// Feature windows recorded while standing
    pub standing: Vec<FeatureVector, WINDOWS_PER_LABEL>,
    /// Pooled heart-rate statistics
    pub hr: GaussStat,
    /// Pooled pnn50 statistics
    pub pnn50: GaussStat,
    /// Pooled kurtosis statistics
    pub kurtosis: GaussStat,
    /// Decision cutoffs written alongside the statistics
    pub thresholds: RuleThresholds,
}

impl CalibrationProfile {
    /// Iterate every accumulated window across all labels
    fn all_windows(&self) -> impl Iterator<Item = &FeatureVector> {
        self.lying
            .iter()
            .chain(self.sitting.iter())
            .chain(self.standing.iter())
    }

    /// Total accumulated windows across all labels
    pub fn window_count(&self) -> usize {
        self.lying.len() + self.sitting.len() + self.standing.len()
    }
}

/// Durable storage for calibration profiles
///
/// `save` must persist the whole profile atomically with respect to
/// `load`; a reader sees either the previous profile or the new one.
pub trait ProfileStore {
    /// Storage failure type
    type Error;

    /// Persist one complete profile
    fn save(&mut self, profile: &CalibrationProfile) -> Result<(), Self::Error>;

    /// Retrieve the stored profile, if any has ever been saved
    fn load(&self) -> Result<Option<CalibrationProfile>, Self::Error>;
}

/// In-memory store for tests and host-side tooling
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profile: Option<CalibrationProfile>,
}

impl ProfileStore for MemoryProfileStore {
    type Error = core::convert::Infallible;

    fn save(&mut self, profile: &CalibrationProfile) -> Result<(), Self::Error> {
        self.profile = Some(profile.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<CalibrationProfile>, Self::Error> {
        Ok(self.profile.clone())
    }
}

/// Session-based calibration accumulator
///
/// Lifecycle: [`begin_session`](Self::begin_session) with the posture the
/// wearer is holding, [`record`](Self::record) each extracted feature
/// vector, [`end_session`](Self::end_session) to derive statistics and
/// flush the whole profile to the store.
#[derive(Debug, Clone, Default)]
pub struct CalibrationEngine {
    profile: CalibrationProfile,
    session_label: Option<Posture>,
}

impl CalibrationEngine {
    /// Engine resuming from a previously stored profile
    pub fn with_profile(profile: CalibrationProfile) -> Self {
        Self {
            profile,
            session_label: None,
        }
    }

    /// Start accumulating under a posture label
    ///
    /// Lying, sitting and standing are calibratable; other labels are
    /// refused and leave the engine idle.
    pub fn begin_session(&mut self, label: Posture) -> bool {
        match label {
            Posture::Lying | Posture::Sitting | Posture::Standing => {
                self.session_label = Some(label);
                true
            }
            _ => {
                self.session_label = None;
                false
            }
        }
    }

    /// Record one feature vector under the active session label
    ///
    /// Returns `false` when no session is active or the label's window
    /// storage is full; the vector is silently dropped in both cases.
    pub fn record(&mut self, features: FeatureVector) -> bool {
        let windows = match self.session_label {
            Some(Posture::Lying) => &mut self.profile.lying,
            Some(Posture::Sitting) => &mut self.profile.sitting,
            Some(Posture::Standing) => &mut self.profile.standing,
            _ => return false,
        };
        windows.push(features).is_ok()
    }

    /// End the session: derive pooled statistics and flush atomically
    ///
    /// Statistics always pool *all* windows of *all* labels collected so
    /// far. Thresholds are rewritten with their fixed defaults on every
    /// flush.
    pub fn end_session<S: ProfileStore>(&mut self, store: &mut S) -> Result<(), S::Error> {
        self.session_label = None;

        self.profile.hr = pooled_stat(&self.profile, FEAT_HR_MEAN);
        self.profile.pnn50 = pooled_stat(&self.profile, FEAT_PNN50);
        self.profile.kurtosis = pooled_stat(&self.profile, FEAT_KURTOSIS);
        self.profile.thresholds = RuleThresholds::default();

        store.save(&self.profile)
    }

    /// Whether a calibration session is currently active
    pub fn session_active(&self) -> bool {
        self.session_label.is_some()
    }

    /// The profile as accumulated so far
    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }
}

/// Pooled mean and population standard deviation of one feature index
fn pooled_stat(profile: &CalibrationProfile, index: usize) -> GaussStat {
    let n = profile.window_count();
    if n == 0 {
        return GaussStat::default();
    }

    let mut sum = 0.0f32;
    for fv in profile.all_windows() {
        sum += fv.as_array()[index];
    }
    let mu = sum / n as f32;

    let mut sq = 0.0f32;
    for fv in profile.all_windows() {
        let d = fv.as_array()[index] - mu;
        sq += d * d;
    }
    let sigma = libm::sqrtf(sq / n as f32);

    GaussStat { mu, sigma }
}

/// Stateless z-score rule engine over a calibration profile
pub struct RuleClassifier;

impl RuleClassifier {
    /// Classify a fresh feature vector against a profile
    ///
    /// Without a profile every vector maps to the sitting fallback.
    pub fn classify(profile: Option<&CalibrationProfile>, features: &FeatureVector) -> Posture {
        let profile = match profile {
            Some(p) => p,
            None => return Posture::Sitting,
        };

        let hr_z = profile.hr.z_score(features.hr_mean());
        let pnn50_z = profile.pnn50.z_score(features.pnn50());
        let kurtosis_z = profile.kurtosis.z_score(features.kurtosis());

        let t = &profile.thresholds;
        if hr_z < t.hr_z_max && pnn50_z > t.pnn50_z_min {
            Posture::Lying
        } else if hr_z > t.hr_z_min && kurtosis_z > t.kurtosis_z_min {
            Posture::Standing
        } else {
            Posture::Sitting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ppg::FEATURE_COUNT;

    fn fv(hr: f32, pnn50: f32, kurtosis: f32) -> FeatureVector {
        let mut v = [0.0f32; FEATURE_COUNT];
        v[FEAT_HR_MEAN] = hr;
        v[FEAT_PNN50] = pnn50;
        v[FEAT_KURTOSIS] = kurtosis;
        FeatureVector(v)
    }

    /// Profile with hr mu=60 sigma=10, pnn50 mu=0.2 sigma=0.1,
    /// kurtosis mu=2 sigma=1
    fn profile() -> CalibrationProfile {
        CalibrationProfile {
            hr: GaussStat {
                mu: 60.0,
                sigma: 10.0,
            },
            pnn50: GaussStat {
                mu: 0.2,
                sigma: 0.1,
            },
            kurtosis: GaussStat {
                mu: 2.0,
                sigma: 1.0,
            },
            ..CalibrationProfile::default()
        }
    }

    #[test]
    fn no_profile_always_falls_back_to_sitting() {
        let extreme = fv(200.0, 1.0, 50.0);
        assert_eq!(RuleClassifier::classify(None, &extreme), Posture::Sitting);
        assert_eq!(
            RuleClassifier::classify(None, &fv(0.0, 0.0, 0.0)),
            Posture::Sitting
        );
    }

    #[test]
    fn supine_rule_requires_low_hr_and_high_pnn50() {
        let p = profile();

        // hrZ = -1, pnn50Z = +1
        assert_eq!(
            RuleClassifier::classify(Some(&p), &fv(50.0, 0.3, 2.0)),
            Posture::Lying
        );
        // Low HR alone is not enough
        assert_eq!(
            RuleClassifier::classify(Some(&p), &fv(50.0, 0.2, 2.0)),
            Posture::Sitting
        );
    }

    #[test]
    fn standing_rule_requires_high_hr_and_high_kurtosis() {
        let p = profile();

        // hrZ = +1, kurtosisZ = +1
        assert_eq!(
            RuleClassifier::classify(Some(&p), &fv(70.0, 0.2, 3.0)),
            Posture::Standing
        );
        // High HR alone is not enough
        assert_eq!(
            RuleClassifier::classify(Some(&p), &fv(70.0, 0.2, 2.0)),
            Posture::Sitting
        );
    }

    #[test]
    fn zero_sigma_yields_zero_z_and_sitting() {
        let mut p = profile();
        p.hr.sigma = 0.0;
        p.pnn50.sigma = 0.0;
        p.kurtosis.sigma = 0.0;

        assert_eq!(
            RuleClassifier::classify(Some(&p), &fv(200.0, 1.0, 50.0)),
            Posture::Sitting
        );
    }

    #[test]
    fn statistics_pool_across_all_labels() {
        let mut engine = CalibrationEngine::default();
        let mut store = MemoryProfileStore::default();

        assert!(engine.begin_session(Posture::Lying));
        engine.record(fv(50.0, 0.3, 1.0));
        engine.record(fv(50.0, 0.3, 1.0));
        engine.end_session(&mut store).unwrap();

        assert!(engine.begin_session(Posture::Standing));
        engine.record(fv(70.0, 0.1, 3.0));
        engine.record(fv(70.0, 0.1, 3.0));
        engine.end_session(&mut store).unwrap();

        let saved = store.load().unwrap().unwrap();
        // Pooled over all four windows, both labels
        assert!((saved.hr.mu - 60.0).abs() < 1e-3);
        assert!((saved.hr.sigma - 10.0).abs() < 1e-3);
        assert!((saved.pnn50.mu - 0.2).abs() < 1e-3);
        assert!((saved.kurtosis.mu - 2.0).abs() < 1e-3);
        assert_eq!(saved.window_count(), 4);
    }

    #[test]
    fn flush_writes_constant_thresholds() {
        // The cutoffs are rewritten with fixed defaults on every flush,
        // even when the profile carried different values beforehand.
        let mut profile = CalibrationProfile::default();
        profile.thresholds = RuleThresholds {
            hr_z_max: -9.0,
            pnn50_z_min: 9.0,
            hr_z_min: 9.0,
            kurtosis_z_min: 9.0,
        };

        let mut engine = CalibrationEngine::with_profile(profile);
        let mut store = MemoryProfileStore::default();
        engine.begin_session(Posture::Sitting);
        engine.record(fv(60.0, 0.2, 2.0));
        engine.end_session(&mut store).unwrap();

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.thresholds, RuleThresholds::default());
    }

    #[test]
    fn record_without_session_is_dropped() {
        let mut engine = CalibrationEngine::default();
        assert!(!engine.record(fv(60.0, 0.2, 2.0)));
        assert_eq!(engine.profile().window_count(), 0);
    }

    #[test]
    fn uncalibratable_label_refused() {
        let mut engine = CalibrationEngine::default();
        assert!(!engine.begin_session(Posture::Unknown));
        assert!(!engine.session_active());
    }

    #[test]
    fn full_label_storage_drops_further_windows() {
        let mut engine = CalibrationEngine::default();
        engine.begin_session(Posture::Sitting);
        for _ in 0..WINDOWS_PER_LABEL {
            assert!(engine.record(fv(60.0, 0.2, 2.0)));
        }
        assert!(!engine.record(fv(60.0, 0.2, 2.0)));
        assert_eq!(engine.profile().window_count(), WINDOWS_PER_LABEL);
    }

    #[test]
    fn empty_profile_flushes_zeroed_stats() {
        let mut engine = CalibrationEngine::default();
        let mut store = MemoryProfileStore::default();
        engine.begin_session(Posture::Lying);
        engine.end_session(&mut store).unwrap();

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.hr, GaussStat::default());
        assert!(!engine.session_active());
    }
}
