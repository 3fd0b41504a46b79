use super::PointerFilter;
use crate::{Error, Result};

/// Check that a smoothing factor lies in (0, 1]
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")))
    }
}

/// Exponential smoothing filter: `smoothed = prev + alpha * (raw - prev)`
pub struct ExponentialFilter {
    alpha: f64,
    last: Option<(f64, f64)>,
}

impl ExponentialFilter {
    pub fn new(alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha <= 1.0, "Alpha must be in (0, 1]");
        Self { alpha, last: None }
    }

    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl PointerFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        // First sample after a reset is taken as-is, no acquisition lag
        let filtered = match self.last {
            Some((last_x, last_y)) => (
                last_x + self.alpha * (x - last_x),
                last_y + self.alpha * (y - last_y),
            ),
            None => (x, y),
        };

        self.last = Some(filtered);
        filtered
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}
