//! PPG feature extraction through calibration to rule classification

mod common;

use common::sine_train;
use wristsense_core::{
    calibration::{CalibrationEngine, MemoryProfileStore, ProfileStore, RuleClassifier},
    signal::{extract_features, preprocess},
    FeatureVector, Posture,
};

const FS: f32 = 25.0;

#[test]
fn clean_pulse_train_yields_plausible_heart_rate() {
    // 60 bpm pulse train: one cycle per second at 25 Hz
    let mut window = sine_train(8, 25);
    preprocess(&mut window);
    let fv = extract_features(&window, FS);

    // Filter edge transients may cost a peak at either end
    let peaks = fv.n_peaks();
    assert!((6.0..=10.0).contains(&peaks), "peaks {peaks}");
    let hr = fv.hr_mean();
    assert!((45.0..=75.0).contains(&hr), "hr {hr}");
    // A metronomic train has negligible RR variability
    assert!(fv.pnn50() < 0.3, "pnn50 {}", fv.pnn50());
}

#[test]
fn preprocess_removes_slow_drift_before_extraction() {
    // Same pulse train riding a large linear drift
    let clean = sine_train(8, 25);
    let mut drifting: Vec<f32> = clean
        .iter()
        .enumerate()
        .map(|(i, v)| v + i as f32 * 0.05)
        .collect();
    preprocess(&mut drifting);
    let fv = extract_features(&drifting, FS);

    let hr = fv.hr_mean();
    assert!((45.0..=75.0).contains(&hr), "hr {hr}");
}

#[test]
fn empty_window_degrades_to_zeroed_features() {
    let fv = extract_features(&[], FS);
    assert_eq!(fv, FeatureVector::zeroed());
}

fn fv(hr: f32, pnn50: f32, kurtosis: f32) -> FeatureVector {
    let mut v = FeatureVector::zeroed();
    v.0[2] = hr;
    v.0[0] = pnn50;
    v.0[8] = kurtosis;
    v
}

#[test]
fn calibrated_profile_separates_lying_from_standing() {
    let mut engine = CalibrationEngine::default();
    let mut store = MemoryProfileStore::default();

    // Lying session: low HR, high variability, flat waveform
    assert!(engine.begin_session(Posture::Lying));
    for _ in 0..8 {
        engine.record(fv(50.0, 0.3, 1.5));
    }
    engine.end_session(&mut store).unwrap();

    // Standing session: high HR, low variability, peaky waveform
    assert!(engine.begin_session(Posture::Standing));
    for _ in 0..8 {
        engine.record(fv(70.0, 0.1, 2.5));
    }
    engine.end_session(&mut store).unwrap();

    let profile = store.load().unwrap().unwrap();

    // Fresh windows well into either cluster classify accordingly
    assert_eq!(
        RuleClassifier::classify(Some(&profile), &fv(45.0, 0.35, 1.5)),
        Posture::Lying
    );
    assert_eq!(
        RuleClassifier::classify(Some(&profile), &fv(75.0, 0.1, 3.0)),
        Posture::Standing
    );
    // Ambiguous windows fall back to sitting
    assert_eq!(
        RuleClassifier::classify(Some(&profile), &fv(60.0, 0.2, 2.0)),
        Posture::Sitting
    );
}

#[test]
fn uncalibrated_wearer_always_gets_the_fallback() {
    let store = MemoryProfileStore::default();
    assert!(store.load().unwrap().is_none());

    let fresh = fv(200.0, 1.0, 50.0);
    assert_eq!(RuleClassifier::classify(None, &fresh), Posture::Sitting);
}
