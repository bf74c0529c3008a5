//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Ceil a f64 and clamp it to the i32 range, returning 0 for non-finite values.
#[must_use]
pub fn ceil_f64_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).ceil();
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Clamp a ratio into the unit interval, treating NaN as 0.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
