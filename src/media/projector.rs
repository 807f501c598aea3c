//! Screen-to-world placement.
//!
//! Slot rectangles are in window pixels with Y down; quads are in world
//! units centered on the origin with Y up. Every function here is a no-op
//! while the item has never been measured.

use super::MediaItem;
use crate::layout::LayoutElement;
use crate::viewport::ViewportTracker;

/// Scale the quad so it covers the same fraction of the viewport as the
/// slot covers of the screen.
pub fn update_scale<E>(item: &mut MediaItem<E>, tracker: &ViewportTracker) {
    let Some(bounds) = item.bounds else {
        return;
    };
    item.transform.scale.x = tracker.pixels_to_world_x(bounds.width);
    item.transform.scale.y = tracker.pixels_to_world_y(bounds.height);
}

/// Place the quad horizontally, `origin_x` pixels scrolled to the right.
pub fn update_position_x<E>(
    item: &mut MediaItem<E>,
    tracker: &ViewportTracker,
    origin_x: f32,
) {
    let Some(bounds) = item.bounds else {
        return;
    };
    let viewport = tracker.viewport();
    item.transform.position.x = -(viewport.width / 2.0)
        + item.transform.scale.x / 2.0
        + tracker.pixels_to_world_x(bounds.left - origin_x);
}

/// Place the quad vertically for a scroll offset in pixels, then shift it
/// by the wraparound offset.
pub fn update_position_y<E>(
    item: &mut MediaItem<E>,
    tracker: &ViewportTracker,
    scroll_offset: f32,
) {
    let Some(bounds) = item.bounds else {
        return;
    };
    let viewport = tracker.viewport();
    item.transform.position.y = viewport.height / 2.0
        - item.transform.scale.y / 2.0
        - tracker.pixels_to_world_y(bounds.top - scroll_offset)
        - item.extra;
}

/// Scale then position for the given scroll offset.
pub fn place<E>(
    item: &mut MediaItem<E>,
    tracker: &ViewportTracker,
    scroll_offset: f32,
) {
    update_scale(item, tracker);
    update_position_x(item, tracker, 0.0);
    update_position_y(item, tracker, scroll_offset);
}

/// Re-measure the slot and re-place the quad at scroll offset zero, then
/// publish the quad size to the plane-size uniform. A slot that cannot be
/// measured keeps its previous bounds.
pub fn refresh_bounds<E: LayoutElement>(
    item: &mut MediaItem<E>,
    tracker: &ViewportTracker,
) {
    match item.element.bounding_rect() {
        Some(rect) => item.bounds = Some(rect),
        None => log::warn!("slot {} could not be measured", item.slot),
    }
    place(item, tracker, 0.0);
    item.uniforms.plane_sizes = item.transform.scale.truncate();
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::backend::{MeshId, MeshTransform, TextureId};
    use crate::camera::Camera;
    use crate::layout::Rect;
    use crate::viewport::Size;

    #[derive(Debug, Clone, Copy)]
    struct Fixed(Option<Rect>);

    impl LayoutElement for Fixed {
        fn bounding_rect(&self) -> Option<Rect> {
            self.0
        }
    }

    fn tracker(width: f32, height: f32) -> ViewportTracker {
        let mut camera = Camera::default();
        camera.set_aspect(width, height);
        let mut tracker = ViewportTracker::default();
        tracker.update(
            Size::new(width, height),
            &camera,
            Some(Rect::new(0.0, 0.0, width, height * 3.0)),
        );
        tracker
    }

    fn item(rect: Option<Rect>) -> MediaItem<Fixed> {
        MediaItem::new(Fixed(rect), Fixed(rect), 0, MeshId(0), TextureId(0))
    }

    #[test]
    fn unmeasured_item_is_left_alone() {
        let t = tracker(1000.0, 500.0);
        let mut media = item(None);
        place(&mut media, &t, 40.0);
        assert_eq!(media.transform, MeshTransform::default());
    }

    #[test]
    fn full_screen_slot_fills_viewport_at_origin() {
        let t = tracker(1000.0, 500.0);
        let mut media = item(Some(Rect::new(0.0, 0.0, 1000.0, 500.0)));
        refresh_bounds(&mut media, &t);
        let viewport = t.viewport();
        assert!((media.transform.scale.x - viewport.width).abs() < 1e-5);
        assert!((media.transform.scale.y - viewport.height).abs() < 1e-5);
        assert!(media.transform.position.x.abs() < 1e-5);
        assert!(media.transform.position.y.abs() < 1e-5);
        assert_eq!(
            media.uniforms.plane_sizes,
            Vec2::new(viewport.width, viewport.height)
        );
    }

    #[test]
    fn top_left_slot_hugs_top_left_corner() {
        let t = tracker(1000.0, 500.0);
        let mut media = item(Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        refresh_bounds(&mut media, &t);
        let viewport = t.viewport();
        let left_edge =
            media.transform.position.x - media.transform.scale.x / 2.0;
        let top_edge =
            media.transform.position.y + media.transform.scale.y / 2.0;
        assert!((left_edge + viewport.width / 2.0).abs() < 1e-5);
        assert!((top_edge - viewport.height / 2.0).abs() < 1e-5);
    }

    #[test]
    fn scrolling_moves_quads_up() {
        let t = tracker(1000.0, 500.0);
        let mut media = item(Some(Rect::new(0.0, 200.0, 100.0, 50.0)));
        refresh_bounds(&mut media, &t);
        let resting = media.transform.position.y;
        place(&mut media, &t, 100.0);
        let expected = resting + t.pixels_to_world_y(100.0);
        assert!((media.transform.position.y - expected).abs() < 1e-5);
    }

    #[test]
    fn extra_shifts_quad_down() {
        let t = tracker(1000.0, 500.0);
        let mut media = item(Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        refresh_bounds(&mut media, &t);
        let resting = media.transform.position.y;
        media.extra = t.gallery_height();
        update_position_y(&mut media, &t, 0.0);
        let shifted = resting - t.gallery_height();
        assert!((media.transform.position.y - shifted).abs() < 1e-4);
    }

    #[test]
    fn lost_measurement_keeps_previous_bounds() {
        let t = tracker(800.0, 600.0);
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let mut media = item(Some(rect));
        refresh_bounds(&mut media, &t);
        media.element = Fixed(None);
        refresh_bounds(&mut media, &t);
        assert_eq!(media.bounds, Some(rect));
    }
}
