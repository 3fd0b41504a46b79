//! Pointer smoothing with explicit "no active gesture" state.

use crate::{
    constants::DEFAULT_SMOOTHING_ALPHA,
    filters::{exponential::ExponentialFilter, PointerFilter},
    utils::Point,
};

/// Smoothed cursor; both coordinates are `None` while no gesture is active
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl PointerState {
    #[must_use]
    pub const fn point(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point { x, y }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// Wraps a [`PointerFilter`] and tracks the last smoothed point
pub struct PointerSmoother {
    filter: Box<dyn PointerFilter>,
    state: PointerState,
}

impl Default for PointerSmoother {
    fn default() -> Self {
        Self::new(Box::new(ExponentialFilter::new(DEFAULT_SMOOTHING_ALPHA)))
    }
}

impl std::fmt::Debug for PointerSmoother {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSmoother")
            .field("filter", &self.filter.name())
            .field("state", &self.state)
            .finish()
    }
}

impl PointerSmoother {
    #[must_use]
    pub fn new(filter: Box<dyn PointerFilter>) -> Self {
        Self {
            filter,
            state: PointerState::default(),
        }
    }

    /// Feed a raw sample; returns the previous smoothed point (if any) and the new one
    pub fn smooth(&mut self, raw: Point) -> (Option<Point>, Point) {
        let previous = self.state.point();
        let (x, y) = self.filter.apply(raw.x, raw.y);
        self.state = PointerState {
            x: Some(x),
            y: Some(y),
        };
        (previous, Point { x, y })
    }

    /// Forget the current stroke so the next sample seeds a fresh one
    pub fn reset(&mut self) {
        self.filter.reset();
        self.state = PointerState::default();
    }

    #[must_use]
    pub const fn state(&self) -> PointerState {
        self.state
    }

    #[must_use]
    pub fn filter_name(&self) -> &str {
        self.filter.name()
    }
}
