//! Layout measurement seam.
//!
//! The gallery never lays anything out itself: slot rectangles come from a
//! [`LayoutHost`]. In the browser that is the DOM (`web::DomHost`); natively
//! and in tests it is a [`grid::GridLayout`] computed from a preset.

/// Grid-preset layout host.
pub mod grid;

pub use grid::{GridLayout, GridPlacement, GridSlot};

use crate::viewport::Size;

/// Axis-aligned rectangle in screen pixels, relative to the top-left of the
/// window (DOM `getBoundingClientRect` semantics: Y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Distance from the window's left edge.
    pub left: f32,
    /// Distance from the window's top edge.
    pub top: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Size of the rectangle.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A measurable element (a gallery slot or the image inside it).
pub trait LayoutElement {
    /// Current bounding rectangle, or `None` when the element cannot be
    /// measured (detached, not yet laid out).
    fn bounding_rect(&self) -> Option<Rect>;
}

/// The environment the gallery is mounted into.
pub trait LayoutHost {
    /// Element handle type.
    type Element: LayoutElement;

    /// Window size in pixels.
    fn window_size(&self) -> Size;

    /// Rectangle of the gallery container holding every slot.
    fn gallery_rect(&self) -> Option<Rect>;

    /// Slots matching `selector`, in document order.
    fn query_slots(&self, selector: &str) -> Vec<Self::Element>;

    /// The image element inside a slot, if present.
    fn find_image(&self, slot: &Self::Element) -> Option<Self::Element>;
}
