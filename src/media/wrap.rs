//! Infinite-loop wraparound.
//!
//! A quad that has fully left the viewport in the direction of travel is
//! shifted by one gallery height so it re-enters from the opposite edge.
//! Moving forward (scroll offset growing) quads drift up, so one that has
//! cleared the top edge gains a gallery height of `extra`; moving backward
//! a quad that has cleared the bottom edge loses one.

use super::MediaItem;
use crate::scroll::ScrollDirection;

/// Wraparound adjustment for a quad, as the change to apply to its `extra`.
///
/// `position_y` and `scale_y` are the quad's center and height in world
/// units, `viewport_height` the visible height at the gallery plane.
#[must_use]
pub fn wrap_step(
    position_y: f32,
    scale_y: f32,
    viewport_height: f32,
    direction: ScrollDirection,
    gallery_height: f32,
) -> f32 {
    let plane_offset = scale_y / 2.0;
    let viewport_offset = viewport_height / 2.0;
    let is_before = position_y + plane_offset < -viewport_offset;
    let is_after = position_y - plane_offset > viewport_offset;
    match direction {
        ScrollDirection::Backward if is_before => -gallery_height,
        ScrollDirection::Forward if is_after => gallery_height,
        _ => 0.0,
    }
}

/// Apply the wraparound check to an item, adjusting its `extra`. The new
/// offset takes effect on the next placement. Returns whether it wrapped.
pub fn apply<E>(
    item: &mut MediaItem<E>,
    viewport_height: f32,
    direction: ScrollDirection,
    gallery_height: f32,
) -> bool {
    let step = wrap_step(
        item.transform.position.y,
        item.transform.scale.y,
        viewport_height,
        direction,
        gallery_height,
    );
    if step == 0.0 {
        return false;
    }
    item.extra += step;
    true
}
