//! Time Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = 60_000;

/// Default PPG analysis window length (ms) - 10 s at 25 Hz = 250 samples.
pub const DEFAULT_PPG_WINDOW_MS: u64 = 10_000;

/// Default PPG analysis window length in samples at the design rate.
pub const DEFAULT_PPG_WINDOW_SAMPLES: usize = 250;
