//! Per-frame placement, distortion and wraparound over a real grid
//! layout.

mod common;

use common::{running, snappy, TestGallery};
use vitrine::layout::LayoutHost;
use vitrine::options::Options;
use vitrine::scroll::ScrollDirection;
use vitrine::viewport::Size;
use vitrine::{FrameOutcome, InputEvent};

/// Pixels each snappy wheel step moves the scroll (delta 80 at x0.5).
const STEP_PX: f32 = 40.0;

fn wheel_frames(gallery: &mut TestGallery, delta_y: f32, frames: usize) {
    for _ in 0..frames {
        assert!(gallery.handle_event(InputEvent::Wheel { delta_y }));
        assert_eq!(gallery.tick(), FrameOutcome::Continue);
    }
}

fn assert_whole_multiple(extra: f32, gallery_height: f32) {
    let turns = (extra / gallery_height).round();
    assert!(
        (extra - turns * gallery_height).abs() < 1e-3,
        "extra {extra} is not a multiple of {gallery_height}"
    );
}

#[test]
fn gallery_height_converts_container_height() {
    let (gallery, layout) = running(Options::default());
    let tracker = gallery.viewport();
    let container = layout.gallery_rect().unwrap();
    let expected =
        tracker.viewport().height * container.height / tracker.screen().height;
    assert!((tracker.gallery_height() - expected).abs() < 1e-4);
}

#[test]
fn forward_scroll_recycles_quads_by_whole_gallery_heights() {
    let (mut gallery, layout) = running(snappy());
    let container_px = layout.gallery_rect().unwrap().height;
    let frames = (container_px * 3.0 / STEP_PX) as usize;

    let gallery_height = gallery.viewport().gallery_height();
    let half_view = gallery.viewport().viewport().height / 2.0;
    let step_world = gallery.viewport().pixels_to_world_y(STEP_PX);

    for _ in 0..frames {
        let before: Vec<f32> = gallery.medias().iter().map(|m| m.extra()).collect();
        wheel_frames(&mut gallery, STEP_PX * 2.0, 1);
        for (media, previous) in gallery.medias().iter().zip(before) {
            let change = media.extra() - previous;
            assert!(change == 0.0 || (change - gallery_height).abs() < 1e-4);
            // Nothing drifts further than one frame past the top edge.
            let bottom_edge =
                media.transform().position.y - media.transform().scale.y / 2.0;
            assert!(bottom_edge <= half_view + step_world + 1e-3);
        }
    }

    for media in gallery.medias() {
        assert!(media.extra() > 0.0, "slot {} never wrapped", media.slot());
        assert_whole_multiple(media.extra(), gallery_height);
        assert!((media.extra() / gallery_height).round() >= 2.0);
    }
    assert_eq!(gallery.scroll().direction(), ScrollDirection::Forward);
}

#[test]
fn backward_scroll_wraps_the_other_way() {
    let (mut gallery, layout) = running(snappy());
    let container_px = layout.gallery_rect().unwrap().height;
    let frames = (container_px * 2.0 / STEP_PX) as usize;
    wheel_frames(&mut gallery, -STEP_PX * 2.0, frames);

    let gallery_height = gallery.viewport().gallery_height();
    assert!(gallery.medias().iter().any(|m| m.extra() < 0.0));
    for media in gallery.medias() {
        assert!(media.extra() <= 0.0);
        assert_whole_multiple(media.extra(), gallery_height);
    }
}

#[test]
fn still_gallery_never_wraps() {
    let (mut gallery, _) = running(snappy());
    for _ in 0..120 {
        assert_eq!(gallery.tick(), FrameOutcome::Continue);
    }
    assert!(gallery.medias().iter().all(|m| m.extra() == 0.0));
}

#[test]
fn resize_resets_wraparound_and_remeasures() {
    let (mut gallery, layout) = running(snappy());
    wheel_frames(&mut gallery, STEP_PX * 2.0, 60);
    assert!(gallery.medias().iter().any(|m| m.extra() != 0.0));
    let old_gallery_height = gallery.viewport().gallery_height();

    layout.set_window_size(Size::new(800.0, 600.0));
    assert!(gallery.handle_event(InputEvent::Resized));

    let viewport = gallery.viewport().viewport();
    let container = layout.gallery_rect().unwrap();
    let gallery_height = gallery.viewport().gallery_height();
    assert!((gallery_height - viewport.height * container.height / 600.0).abs() < 1e-4);
    assert!((gallery_height - old_gallery_height).abs() > 1e-3);
    assert_eq!(gallery.backend().unwrap().surface_size(), (800, 600));
    for media in gallery.medias() {
        assert_eq!(media.extra(), 0.0);
        assert_eq!(media.bounds(), layout.slot_rect(media.slot()));
        assert_eq!(media.uniforms().viewport_sizes.y, viewport.height);
        assert_eq!(media.uniforms().plane_sizes, media.transform().scale.truncate());
    }
}

#[test]
fn distortion_follows_frame_velocity() {
    let (mut gallery, _) = running(snappy());
    wheel_frames(&mut gallery, STEP_PX * 2.0, 1);
    let expected = STEP_PX / 1200.0 * 10.0;
    let backend = gallery.backend().unwrap();
    for media in gallery.medias() {
        let pushed = backend.mesh(media.mesh()).unwrap().uniforms.strength;
        assert!((pushed - expected).abs() < 1e-5);
    }

    // A huge flick is clamped.
    wheel_frames(&mut gallery, 100_000.0, 1);
    let strength = gallery.medias()[0].uniforms().strength;
    assert_eq!(strength, 15.0);

    // And a still frame carries no distortion.
    assert_eq!(gallery.tick(), FrameOutcome::Continue);
    assert_eq!(gallery.medias()[0].uniforms().strength, 0.0);
}

#[test]
fn unclamped_distortion_passes_through() {
    let mut options = snappy();
    options.distortion.clamp = false;
    let (mut gallery, _) = running(options);
    wheel_frames(&mut gallery, 100_000.0, 1);
    let strength = gallery.medias()[0].uniforms().strength;
    assert!((strength - 50_000.0 / 1200.0 * 10.0).abs() < 1e-2);
}

#[test]
fn ambient_drift_scrolls_without_input() {
    let (mut gallery, _) = running(Options::default());
    let start = gallery.medias()[0].transform().position.y;
    for _ in 0..20 {
        assert_eq!(gallery.tick(), FrameOutcome::Continue);
    }
    assert!(gallery.scroll().offset() > 0.0);
    assert_eq!(gallery.scroll().direction(), ScrollDirection::Forward);
    assert!(gallery.medias()[0].transform().position.y > start);
}

#[test]
fn drag_scrolls_like_the_browser() {
    let (mut gallery, _) = running(snappy());
    assert!(gallery.handle_event(InputEvent::PointerDown { y: 300.0 }));
    assert!(gallery.handle_event(InputEvent::PointerMove { y: 200.0 }));
    assert_eq!(gallery.tick(), FrameOutcome::Continue);
    assert_eq!(gallery.scroll().offset(), 200.0);
    assert!(gallery.handle_event(InputEvent::PointerUp));
    assert!(gallery.handle_event(InputEvent::PointerMove { y: 0.0 }));
    assert_eq!(gallery.scroll().state().target, 200.0);
}
