//! Rising/falling edge detection for boolean gesture signals.

/// Transition of a boolean signal between two consecutive frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// false -> true
    Rising,
    /// true -> true
    Held,
    /// true -> false
    Falling,
    /// false -> false
    Idle,
}

impl Edge {
    #[must_use]
    pub const fn between(was_active: bool, is_active: bool) -> Self {
        match (was_active, is_active) {
            (false, true) => Self::Rising,
            (true, true) => Self::Held,
            (true, false) => Self::Falling,
            (false, false) => Self::Idle,
        }
    }

    #[must_use]
    pub const fn is_rising(self) -> bool {
        matches!(self, Self::Rising)
    }

    #[must_use]
    pub const fn is_falling(self) -> bool {
        matches!(self, Self::Falling)
    }

    /// Signal is high in the current frame
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Rising | Self::Held)
    }
}

/// Remembers the previous frame's value of one signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    was_active: bool,
}

impl EdgeDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self { was_active: false }
    }

    /// Record this frame's value and report the transition
    pub fn update(&mut self, is_active: bool) -> Edge {
        let edge = Edge::between(self.was_active, is_active);
        self.was_active = is_active;
        edge
    }

    #[must_use]
    pub const fn was_active(&self) -> bool {
        self.was_active
    }

    pub fn reset(&mut self) {
        self.was_active = false;
    }
}
