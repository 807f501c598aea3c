/// Logical scroll direction, derived each frame from `current` vs `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    /// Offset increasing; content moves up the screen.
    #[default]
    Forward,
    /// Offset decreasing; content moves down the screen.
    Backward,
}

impl ScrollDirection {
    /// Sign applied to the ambient drift speed.
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Eased scroll offset in screen pixels.
///
/// `target` accumulates raw input, `current` follows it exponentially and
/// `last` holds the previous frame's `current`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Smoothing factor in (0, 1].
    pub ease: f32,
    /// Smoothed offset.
    pub current: f32,
    /// Raw accumulated offset.
    pub target: f32,
    /// `current` at the end of the previous frame.
    pub last: f32,
}

impl ScrollState {
    /// State at rest at offset zero.
    #[must_use]
    pub fn new(ease: f32) -> Self {
        Self {
            ease,
            current: 0.0,
            target: 0.0,
            last: 0.0,
        }
    }

    /// Move `current` one step toward `target`.
    #[inline]
    pub fn ease_step(&mut self) {
        self.current += (self.target - self.current) * self.ease;
    }

    /// Offset travelled since the previous frame.
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.current - self.last
    }

    /// Direction implied by this frame's movement, `None` when still.
    #[must_use]
    pub fn direction(&self) -> Option<ScrollDirection> {
        if self.current > self.last {
            Some(ScrollDirection::Forward)
        } else if self.current < self.last {
            Some(ScrollDirection::Backward)
        } else {
            None
        }
    }
}

/// Press-drag-release gesture origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchState {
    /// Whether a pointer is currently pressed.
    pub is_down: bool,
    /// Scroll `current` at press time.
    pub position: f32,
    /// Pointer Y coordinate at press time.
    pub start: f32,
}
