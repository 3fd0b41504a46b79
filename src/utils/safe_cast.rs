//! Safe numeric conversions for percentages and wall-clock timestamps

use crate::constants::MS_PER_SECOND;

/// Convert a fraction in [0, 1] to a rounded percentage
///
/// Values outside the range are clamped; non-finite values map to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamped to [0, 100] before the cast
#[allow(clippy::cast_sign_loss)] // Clamped to a non-negative range
pub fn fraction_to_percent(fraction: f64) -> u8 {
    if !fraction.is_finite() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Seconds elapsed between two millisecond timestamps
///
/// A clock that went backwards yields zero rather than a negative duration.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Millisecond timestamps stay far below 2^52
pub fn elapsed_seconds(start_ms: u64, now_ms: u64) -> f64 {
    now_ms.saturating_sub(start_ms) as f64 / MS_PER_SECOND
}
