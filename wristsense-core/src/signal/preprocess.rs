//! Signal Preprocessing: Detrend + Zero-Phase Band-Pass
//!
//! ## Overview
//!
//! Conditions one raw PPG window for peak detection:
//!
//! 1. **Detrend** - least-squares linear fit of sample index vs. value,
//!    subtracted out. Removes baseline drift from perfusion changes and
//!    slow motion.
//! 2. **Zero-phase band-pass** - the fixed pulse-band IIR filter applied
//!    forward, then again over the time-reversed signal. Forward-backward
//!    filtering cancels the filter's phase distortion (peak positions stay
//!    put) and doubles the effective order.
//!
//! The coefficients in [`crate::constants::ppg`] assume 25 Hz sampling with
//! a 0.5-5 Hz passband. They are intentionally not parameterized: a
//! different sample rate requires regenerated coefficients, not a scaled
//! copy of these.
//!
//! ## Failure Policy
//!
//! Pure function of the input buffer. The only degenerate case is a window
//! shorter than 3 samples, where a line cannot be fit and the filter has
//! nothing to settle on: the input is returned unchanged, with a debug
//! log so misconfigured callers notice.

use crate::constants::ppg::{BANDPASS_A, BANDPASS_B};

/// Minimum window length the preprocessor accepts
pub const MIN_WINDOW_LEN: usize = 3;

/// Condition a raw signal window in place
///
/// Applies detrending followed by the zero-phase band-pass. Windows shorter
/// than [`MIN_WINDOW_LEN`] are left untouched.
pub fn preprocess(window: &mut [f32]) {
    if window.len() < MIN_WINDOW_LEN {
        debug_assert!(
            window.is_empty(),
            "preprocess called with a degenerate non-empty window"
        );
        #[cfg(feature = "std")]
        log::debug!(
            "preprocess: window of {} samples is below minimum {}, returning unchanged",
            window.len(),
            MIN_WINDOW_LEN
        );
        return;
    }

    detrend(window);
    bandpass_zero_phase(window);
}

/// Remove the least-squares linear trend from a window, in place
///
/// Fits `value = slope * index + intercept` and subtracts the fitted line.
pub fn detrend(window: &mut [f32]) {
    let n = window.len();
    if n < 2 {
        return;
    }

    let n_f = n as f32;
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut sum_xy = 0.0f32;
    let mut sum_xx = 0.0f32;

    for (i, &y) in window.iter().enumerate() {
        let x = i as f32;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denom = n_f * sum_xx - sum_x * sum_x;
    if denom == 0.0 {
        return;
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;

    for (i, y) in window.iter_mut().enumerate() {
        *y -= slope * i as f32 + intercept;
    }
}

/// Apply the pulse-band filter forward and backward, in place
///
/// Forward pass, reverse, second pass, re-reverse. Both passes start from
/// zero filter state; the window is long relative to the filter's settling
/// time, so edge transients stay confined to the window ends.
pub fn bandpass_zero_phase(window: &mut [f32]) {
    filter_in_place(window);
    window.reverse();
    filter_in_place(window);
    window.reverse();
}

/// Single forward IIR pass in direct form II transposed
///
/// DF2T needs only four state registers for this 5-coefficient filter and
/// lets the output overwrite the input sample by sample.
fn filter_in_place(window: &mut [f32]) {
    let b = BANDPASS_B;
    let a = BANDPASS_A;
    let mut z = [0.0f32; 4];

    for sample in window.iter_mut() {
        let x = *sample;
        let y = b[0] * x + z[0];
        z[0] = b[1] * x - a[1] * y + z[1];
        z[1] = b[2] * x - a[2] * y + z[2];
        z[2] = b[3] * x - a[3] * y + z[3];
        z[3] = b[4] * x - a[4] * y;
        *sample = y;
    }
}
