//! Stair-Climb Detection Constants

/// Altitude gain that confirms one floor climbed (m).
///
/// Typical residential/office floor-to-floor height is 2.8-3.2 m.
pub const FLOOR_HEIGHT_M: f32 = 3.0;

/// Minimum step events required alongside the altitude gain.
///
/// Gates out pressure drift and elevators: a real stair climb always
/// produces steps.
pub const MIN_STEPS_PER_FLOOR: u32 = 3;

/// Maximum age of the altitude reference before it is re-anchored (ms).
///
/// A slow drift that takes longer than this to accumulate the floor height
/// never confirms.
pub const STAIR_WINDOW_MS: u64 = 3000;
