//! Screen and viewport dimension tracking.
//!
//! Layout hosts report rectangles in screen pixels; quads live in world
//! units. The tracker keeps both sizes plus the gallery height so the
//! conversion is a ratio of the two.

use crate::camera::Camera;
use crate::layout::Rect;

/// Width/height pair, in pixels or world units depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Construct a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both extents are positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Current screen, viewport, and gallery-height measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportTracker {
    screen: Size,
    viewport: Size,
    gallery_height: f32,
}

impl ViewportTracker {
    /// Screen (window) size in pixels.
    #[must_use]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Visible world-space size at the gallery plane.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Height of the full image strip in world units; the wraparound step.
    #[must_use]
    pub fn gallery_height(&self) -> f32 {
        self.gallery_height
    }

    /// Recompute from a new screen size and the camera that already carries
    /// the matching aspect. A missing gallery rect keeps the previous
    /// gallery height.
    pub fn update(
        &mut self,
        screen: Size,
        camera: &Camera,
        gallery: Option<Rect>,
    ) {
        self.screen = screen;
        self.viewport = camera.viewport_size();
        match gallery {
            Some(rect) => {
                self.gallery_height = self.pixels_to_world_y(rect.height);
            }
            None => {
                log::warn!("gallery container not measurable, keeping previous height");
            }
        }
    }

    /// Convert a horizontal pixel extent to world units.
    #[must_use]
    pub fn pixels_to_world_x(&self, pixels: f32) -> f32 {
        if self.screen.width <= 0.0 {
            return 0.0;
        }
        self.viewport.width * pixels / self.screen.width
    }

    /// Convert a vertical pixel extent to world units.
    #[must_use]
    pub fn pixels_to_world_y(&self, pixels: f32) -> f32 {
        if self.screen.height <= 0.0 {
            return 0.0;
        }
        self.viewport.height * pixels / self.screen.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(width: f32, height: f32, gallery_px: f32) -> ViewportTracker {
        let mut camera = Camera::default();
        camera.set_aspect(width, height);
        let mut tracker = ViewportTracker::default();
        tracker.update(
            Size::new(width, height),
            &camera,
            Some(Rect::new(0.0, 0.0, width, gallery_px)),
        );
        tracker
    }

    #[test]
    fn gallery_height_converts_through_viewport_ratio() {
        let t = tracker(1000.0, 800.0, 2400.0);
        let expected = t.viewport().height * 3.0;
        assert!((t.gallery_height() - expected).abs() < 1e-4);
    }

    #[test]
    fn full_screen_maps_to_full_viewport() {
        let t = tracker(1200.0, 600.0, 600.0);
        assert!((t.pixels_to_world_x(1200.0) - t.viewport().width).abs() < 1e-5);
        assert!((t.pixels_to_world_y(600.0) - t.viewport().height).abs() < 1e-5);
    }

    #[test]
    fn missing_gallery_keeps_previous_height() {
        let mut t = tracker(1000.0, 800.0, 1600.0);
        let before = t.gallery_height();
        let camera = Camera::default();
        t.update(Size::new(1000.0, 800.0), &camera, None);
        assert_eq!(t.gallery_height(), before);
    }

    #[test]
    fn zero_screen_converts_to_zero() {
        let t = ViewportTracker::default();
        assert_eq!(t.pixels_to_world_x(100.0), 0.0);
        assert_eq!(t.pixels_to_world_y(100.0), 0.0);
    }
}
