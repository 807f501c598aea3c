//! Input accumulation and per-frame scroll advance.
//!
//! Wheel and drag input only move `target`; every frame `advance` adds the
//! ambient drift, eases `current` toward `target`, and derives the
//! direction that the wraparound resolver reads. Releasing a drag needs no
//! momentum model: the remaining gap decays at `ease` per frame.

use super::state::{ScrollDirection, ScrollState, TouchState};
use crate::options::ScrollOptions;

/// Owns scroll, touch, and drift state for one gallery.
#[derive(Debug, Clone)]
pub struct ScrollController {
    scroll: ScrollState,
    touch: TouchState,
    direction: ScrollDirection,
    speed: f32,
    options: ScrollOptions,
}

impl ScrollController {
    /// Controller at rest, drifting forward.
    #[must_use]
    pub fn new(options: ScrollOptions) -> Self {
        Self {
            scroll: ScrollState::new(options.ease),
            touch: TouchState::default(),
            direction: ScrollDirection::Forward,
            speed: options.ambient_speed,
            options,
        }
    }

    /// Current scroll state.
    #[must_use]
    pub fn state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Current drag gesture state.
    #[must_use]
    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    /// Direction derived on the last frame that moved.
    #[must_use]
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Drift added to `target` on the next frame.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Eased offset consumed by vertical placement.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.scroll.current
    }

    /// Wheel input: `target += delta_y * wheel_multiplier`.
    pub fn on_wheel(&mut self, delta_y: f32) {
        self.scroll.target += delta_y * self.options.wheel_multiplier;
    }

    /// Pointer or touch press at screen Y `y`.
    pub fn on_press(&mut self, y: f32) {
        self.touch = TouchState {
            is_down: true,
            position: self.scroll.current,
            start: y,
        };
    }

    /// Pointer or touch move. Dragging up scrolls forward.
    pub fn on_drag(&mut self, y: f32) {
        if !self.touch.is_down {
            return;
        }
        let distance = (self.touch.start - y) * self.options.drag_multiplier;
        self.scroll.target = self.touch.position + distance;
    }

    /// Pointer or touch release.
    pub fn on_release(&mut self) {
        self.touch.is_down = false;
    }

    /// Add drift, ease `current`, and recompute direction and drift sign.
    pub fn advance(&mut self) {
        self.scroll.target += self.speed;
        self.scroll.ease_step();

        if let Some(direction) = self.scroll.direction() {
            self.direction = direction;
            self.speed = self.options.ambient_speed * direction.sign();
        }
    }

    /// Close the frame: `last = current`.
    pub fn commit(&mut self) {
        self.scroll.last = self.scroll.current;
    }
}
