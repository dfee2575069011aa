//! PPG Processing Constants
//!
//! Filter coefficients, the positional layout of the HRV feature vector,
//! and the fixed z-score cutoffs of the calibration rule engine.

// ===== BAND-PASS FILTER =====

/// Numerator (b) coefficients of the pulse-band IIR filter.
///
/// Designed for a 0.5-5 Hz passband at 25 Hz sampling. Applied forward and
/// backward for zero phase, which doubles the effective order. If the input
/// rate differs from [`PPG_DESIGN_RATE_HZ`] these must be regenerated; they
/// are deliberately not parameterized.
pub const BANDPASS_B: [f32; 5] = [0.2066, 0.0, -0.4131, 0.0, 0.2066];

/// Denominator (a) coefficients of the pulse-band IIR filter (a[0] = 1).
pub const BANDPASS_A: [f32; 5] = [1.0, -0.3695, -0.1958, 0.0166, 0.0365];

/// Sampling rate the band-pass coefficients were designed for (Hz).
pub const PPG_DESIGN_RATE_HZ: f32 = 25.0;

// ===== FEATURE VECTOR LAYOUT =====
//
// Indices are fixed by position, not name, to match the historical layout
// consumed by both the rule engine and the external ML collaborator.

/// Number of scalar features per analysis window.
pub const FEATURE_COUNT: usize = 10;

/// Index of pnn50 (fraction of |RR diff| > 50 ms).
pub const FEAT_PNN50: usize = 0;
/// Index of the mean RR interval (s).
pub const FEAT_RR_MEAN: usize = 1;
/// Index of the mean heart rate (bpm).
pub const FEAT_HR_MEAN: usize = 2;
/// Index of RMSSD (s).
pub const FEAT_RMSSD: usize = 3;
/// Index of the detected peak count.
pub const FEAT_N_PEAKS: usize = 4;
/// Index of the mean crest time (s).
pub const FEAT_CREST_TIME: usize = 5;
/// Index of the mean dwell time (s).
pub const FEAT_DWELL_TIME: usize = 6;
/// Index of the mean pulse-wave transit fraction.
pub const FEAT_PW_TRANSIT_FRACTION: usize = 7;
/// Index of signal kurtosis.
pub const FEAT_KURTOSIS: usize = 8;
/// Index of signal skewness.
pub const FEAT_SKEWNESS: usize = 9;

/// RR-difference threshold for pnn50 (s).
pub const PNN50_THRESHOLD_S: f32 = 0.05;

/// Second central moment below which kurtosis/skewness are reported as
/// zero - the signal is near-constant and the ratios would be noise.
pub const MOMENT_EPSILON: f32 = 1e-6;

// ===== RULE ENGINE THRESHOLDS =====
//
// Fixed default z-score cutoffs written alongside every calibration
// profile. The engine computes mu/sigma from the accumulated windows but
// the cutoffs themselves are constants, not learned.

/// Supine rule: heart-rate z-score must fall below this.
pub const RULE_HR_Z_MAX: f32 = -0.5;

/// Supine rule: pnn50 z-score must rise above this.
pub const RULE_PNN50_Z_MIN: f32 = 0.5;

/// Standing rule: heart-rate z-score must rise above this.
pub const RULE_HR_Z_MIN: f32 = 0.5;

/// Standing rule: kurtosis z-score must rise above this.
pub const RULE_KURTOSIS_Z_MIN: f32 = 0.5;
