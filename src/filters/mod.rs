//! Signal filtering algorithms for smoothing pointer input.
//!
//! Landmark positions jitter from frame to frame; these filters smooth the 2D
//! pointer derived from them before it reaches a mode controller.

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{constants::DEFAULT_SMOOTHING_ALPHA, Error, Result};

/// Trait for all pointer filters
pub trait PointerFilter: Send + Sync {
    /// Apply filter to input values
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl PointerFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        (x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a pointer filter from a descriptor such as `"exponential"`,
/// `"exponential:0.3"` or `"none"`
pub fn create_filter(filter_str: &str) -> Result<Box<dyn PointerFilter>> {
    let lowered = filter_str.to_lowercase();
    let mut parts = lowered.split(':');
    let name = parts.next().unwrap_or_default();
    let params: Vec<&str> = parts.collect();

    match name {
        "none" | "nofilter" => {
            if params.is_empty() {
                Ok(Box::new(NoFilter))
            } else {
                Err(Error::FilterError(format!("Filter '{name}' takes no parameters")))
            }
        }
        "exponential" | "ema" => {
            let alpha = match params.as_slice() {
                [] => DEFAULT_SMOOTHING_ALPHA,
                [alpha] => alpha
                    .parse::<f64>()
                    .map_err(|e| Error::FilterError(format!("Invalid alpha '{alpha}': {e}")))?,
                _ => {
                    return Err(Error::FilterError(format!(
                        "Too many parameters for exponential filter: {filter_str}"
                    )))
                }
            };
            exponential::validate_alpha(alpha)?;
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {filter_str}"))),
    }
}
