//! PPG Signal Processing
//!
//! Two-stage deterministic pipeline over one analysis window of raw PPG
//! samples (default 10 s at 25 Hz):
//!
//! ```text
//! raw window → detrend → zero-phase band-pass → peak/trough detection
//!                                                      ↓
//!                                          10-slot HRV feature vector
//! ```
//!
//! [`preprocess`] conditions the window in place; [`features`] turns the
//! conditioned window into a fixed-layout [`features::FeatureVector`]
//! consumed by both the calibration rule engine and the external ML
//! collaborator. Neither stage ever fails: degenerate input degrades to an
//! unchanged buffer or an all-zero vector.

pub mod features;
pub mod preprocess;

pub use features::{extract_features, FeatureVector};
pub use preprocess::preprocess;
