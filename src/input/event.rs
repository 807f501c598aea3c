use crate::scroll::ScrollController;

/// Platform-agnostic input events.
///
/// Hosts translate wheel, mouse, and touch events into these and feed them
/// to [`Gallery::handle_event`](crate::Gallery::handle_event). Mouse and
/// touch both become pointer events; only the vertical coordinate matters.
///
/// # Example
///
/// ```ignore
/// gallery.handle_event(InputEvent::Wheel { delta_y: 120.0 });
/// gallery.handle_event(InputEvent::PointerDown { y: 300.0 });
/// gallery.handle_event(InputEvent::PointerMove { y: 200.0 });
/// gallery.handle_event(InputEvent::PointerUp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel scrolled. Positive values scroll the content forward, matching
    /// the DOM `WheelEvent.deltaY` sign.
    Wheel {
        /// Vertical delta in pixels.
        delta_y: f32,
    },
    /// Mouse button or first touch pressed.
    PointerDown {
        /// Vertical position in screen pixels.
        y: f32,
    },
    /// Pointer moved (only acts while pressed).
    PointerMove {
        /// Vertical position in screen pixels.
        y: f32,
    },
    /// Mouse button or touch released.
    PointerUp,
    /// The window was resized; the layout host already reports the new
    /// size.
    Resized,
}

impl InputEvent {
    /// Apply a scroll-affecting event to the controller. Returns `false` for
    /// events the controller does not consume ([`InputEvent::Resized`]).
    pub fn apply(self, scroll: &mut ScrollController) -> bool {
        match self {
            Self::Wheel { delta_y } => scroll.on_wheel(delta_y),
            Self::PointerDown { y } => scroll.on_press(y),
            Self::PointerMove { y } => scroll.on_drag(y),
            Self::PointerUp => scroll.on_release(),
            Self::Resized => return false,
        }
        true
    }
}
