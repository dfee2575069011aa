//! HRV-Style Feature Extraction from a Preprocessed PPG Window
//!
//! ## Overview
//!
//! Turns one band-passed window into a fixed 10-slot feature vector:
//! inter-peak (RR) statistics, pulse morphology timings, and signal shape
//! moments. The layout is positional and frozen - slot meanings are pinned
//! in [`crate::constants::ppg`] and shared with the external ML
//! collaborator, so slots must never be reordered.
//!
//! ## Peak Detection
//!
//! Strict 3-point comparison: index `i` is a peak when
//! `x[i-1] < x[i] > x[i+1]`, a trough when `x[i-1] > x[i] < x[i+1]`.
//! No extra smoothing beyond the band-pass. Isolated noise at the Nyquist
//! limit can produce false peaks; that is an accepted, published limitation
//! of this detector, not something to silently "improve".
//!
//! ## Failure Policy
//!
//! Never fails, degrades to zero: an empty or degenerate window yields an
//! all-zero vector. Every slot individually falls back to 0.0 when its
//! inputs are missing (no peaks, no RR intervals, near-constant signal).

use heapless::Vec;

use crate::constants::ppg::{
    FEATURE_COUNT, FEAT_CREST_TIME, FEAT_DWELL_TIME, FEAT_HR_MEAN, FEAT_KURTOSIS, FEAT_N_PEAKS,
    FEAT_PNN50, FEAT_PW_TRANSIT_FRACTION, FEAT_RMSSD, FEAT_RR_MEAN, FEAT_SKEWNESS,
    MOMENT_EPSILON, PNN50_THRESHOLD_S,
};

/// Maximum extrema retained per analysis window
///
/// A 10 s window at 25 Hz holds 250 samples; alternating extrema cap out
/// near half that. 128 covers the worst case.
const MAX_EXTREMA: usize = 128;

/// Fixed-layout vector of 10 scalar features for one analysis window
///
/// Immutable once produced. Slot order is part of the published contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector(pub [f32; FEATURE_COUNT]);

impl FeatureVector {
    /// All-zero vector, the degenerate-input result
    pub const fn zeroed() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    /// Raw slot access
    pub const fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.0
    }

    /// Fraction of consecutive RR differences over 50 ms
    pub fn pnn50(&self) -> f32 {
        self.0[FEAT_PNN50]
    }

    /// Mean RR interval (s)
    pub fn rr_mean(&self) -> f32 {
        self.0[FEAT_RR_MEAN]
    }

    /// Mean heart rate (bpm)
    pub fn hr_mean(&self) -> f32 {
        self.0[FEAT_HR_MEAN]
    }

    /// Root-mean-square of successive RR differences (s)
    pub fn rmssd(&self) -> f32 {
        self.0[FEAT_RMSSD]
    }

    /// Number of detected peaks
    pub fn n_peaks(&self) -> f32 {
        self.0[FEAT_N_PEAKS]
    }

    /// Signal kurtosis (m4 / m2²)
    pub fn kurtosis(&self) -> f32 {
        self.0[FEAT_KURTOSIS]
    }

    /// Signal skewness (m3 / m2^1.5)
    pub fn skewness(&self) -> f32 {
        self.0[FEAT_SKEWNESS]
    }
}

/// Extract the 10-slot feature vector from a preprocessed window
///
/// `fs` is the sampling rate in Hz. Degenerate input (fewer than 3 samples,
/// no peaks, `fs <= 0`) yields zeros in the affected slots rather than an
/// error.
pub fn extract_features(window: &[f32], fs: f32) -> FeatureVector {
    let mut out = FeatureVector::zeroed();

    if window.len() < 3 || fs <= 0.0 {
        return out;
    }

    let peaks = find_extrema(window, Extremum::Peak);
    let troughs = find_extrema(window, Extremum::Trough);

    out.0[FEAT_N_PEAKS] = peaks.len() as f32;

    // RR intervals in seconds from consecutive peak spacing
    let mut rr: Vec<f32, MAX_EXTREMA> = Vec::new();
    for pair in peaks.windows(2) {
        let interval = (pair[1] - pair[0]) as f32 / fs;
        // Capacity matches the peaks vector; push cannot fail
        let _ = rr.push(interval);
    }

    if !rr.is_empty() {
        let rr_mean = rr.iter().sum::<f32>() / rr.len() as f32;
        out.0[FEAT_RR_MEAN] = rr_mean;
        if rr_mean > 0.0 {
            out.0[FEAT_HR_MEAN] = 60.0 / rr_mean;
        }
    }

    if rr.len() >= 2 {
        let mut over = 0usize;
        let mut sq_sum = 0.0f32;
        let n_diffs = rr.len() - 1;
        for pair in rr.windows(2) {
            let diff = pair[1] - pair[0];
            if diff.abs() > PNN50_THRESHOLD_S {
                over += 1;
            }
            sq_sum += diff * diff;
        }
        out.0[FEAT_PNN50] = over as f32 / n_diffs as f32;
        out.0[FEAT_RMSSD] = libm::sqrtf(sq_sum / n_diffs as f32);
    }

    morphology_means(&peaks, &troughs, fs, &mut out);
    shape_moments(window, &mut out);

    out
}

#[derive(Clone, Copy, PartialEq)]
enum Extremum {
    Peak,
    Trough,
}

/// Strict 3-point extremum scan
fn find_extrema(window: &[f32], kind: Extremum) -> Vec<usize, MAX_EXTREMA> {
    let mut indices: Vec<usize, MAX_EXTREMA> = Vec::new();

    for i in 1..window.len().saturating_sub(1) {
        let hit = match kind {
            Extremum::Peak => window[i - 1] < window[i] && window[i] > window[i + 1],
            Extremum::Trough => window[i - 1] > window[i] && window[i] < window[i + 1],
        };
        if hit && indices.push(i).is_err() {
            // Window denser than the worst case we size for; keep what fits
            break;
        }
    }

    indices
}

/// Mean crest time, dwell time and transit fraction over matched peaks
///
/// Each peak is matched to its nearest preceding trough and nearest
/// following trough; peaks missing either neighbor are excluded from all
/// three means.
fn morphology_means(peaks: &[usize], troughs: &[usize], fs: f32, out: &mut FeatureVector) {
    let mut crest_sum = 0.0f32;
    let mut dwell_sum = 0.0f32;
    let mut fraction_sum = 0.0f32;
    let mut matched = 0usize;

    for &peak in peaks {
        let preceding = troughs.iter().rev().find(|&&t| t < peak);
        let following = troughs.iter().find(|&&t| t > peak);

        if let (Some(&before), Some(&after)) = (preceding, following) {
            let crest = (peak - before) as f32 / fs;
            let dwell = (after - before) as f32 / fs;
            crest_sum += crest;
            dwell_sum += dwell;
            fraction_sum += if dwell > 0.0 { crest / dwell } else { 0.0 };
            matched += 1;
        }
    }

    if matched > 0 {
        let n = matched as f32;
        out.0[FEAT_CREST_TIME] = crest_sum / n;
        out.0[FEAT_DWELL_TIME] = dwell_sum / n;
        out.0[FEAT_PW_TRANSIT_FRACTION] = fraction_sum / n;
    }
}

/// Central-moment kurtosis and skewness of the whole window
fn shape_moments(window: &[f32], out: &mut FeatureVector) {
    let n = window.len() as f32;
    let mean = window.iter().sum::<f32>() / n;

    let mut m2 = 0.0f32;
    let mut m3 = 0.0f32;
    let mut m4 = 0.0f32;
    for &x in window {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    // Near-constant signal: the ratios would amplify float noise
    if m2 > MOMENT_EPSILON {
        out.0[FEAT_KURTOSIS] = m4 / (m2 * m2);
        out.0[FEAT_SKEWNESS] = m3 / (m2 * libm::sqrtf(m2));
    }
}
