//! Physical Constants
//!
//! Gravity reference and the barometric formula used to convert raw
//! pressure readings into altitude estimates.

/// Standard gravity at Earth's surface (m/s²).
///
/// Reference magnitude for a resting accelerometer. Deviations from this
/// magnitude indicate linear acceleration on top of gravity.
///
/// Source: CODATA standard acceleration of gravity
pub const GRAVITY_M_PER_S2: f32 = 9.81;

/// Standard atmospheric pressure at sea level (hPa).
///
/// Reference pressure for the barometric altitude formula. Actual sea-level
/// pressure varies with weather, so derived altitudes are only meaningful
/// as *relative* values over short horizons.
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_PRESSURE_HPA: f32 = 1013.25;

/// Scale factor of the international barometric altitude formula (m).
///
/// altitude = SCALE * (1 - (P / P0)^EXPONENT)
///
/// Valid in the troposphere; more than enough for floor-level resolution.
pub const BAROMETRIC_ALTITUDE_SCALE_M: f32 = 44330.0;

/// Exponent of the international barometric altitude formula.
pub const BAROMETRIC_ALTITUDE_EXPONENT: f32 = 0.190295;

/// Smoothing factor for the altitude EMA feeding the stair detector.
///
/// Consumer barometers jitter by ~0.1 hPa, which maps to roughly 0.8 m of
/// apparent altitude. Left unsmoothed that jitter would trip the 3 m floor
/// gate. Alpha 0.3 settles within ~1 s at typical barometer rates while
/// still tracking a real stair climb.
pub const ALTITUDE_EMA_ALPHA: f32 = 0.3;
