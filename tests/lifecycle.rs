//! Gallery lifecycle: bootstrap phases, failure surfacing, teardown.

mod common;

use std::time::Duration;

use common::{layout_for, running, running_with, snappy, TestGallery};
use vitrine::backend::headless::HeadlessBackend;
use vitrine::backend::{
    ImagePixels, MediaUniforms, MeshId, MeshTransform, RenderBackend,
    TextureId,
};
use vitrine::camera::Camera;
use vitrine::gallery::BootstrapStage;
use vitrine::media::ImageState;
use vitrine::options::Options;
use vitrine::{FrameOutcome, Gallery, InputEvent, Phase, VitrineError};

#[test]
fn tick_before_running_halts() {
    let options = Options::default();
    let layout = layout_for(&options);
    let mut gallery: TestGallery = Gallery::new(options, layout);
    assert_eq!(gallery.phase(), Phase::Uninitialized);
    assert_eq!(gallery.tick(), FrameOutcome::Halt);

    gallery.start().unwrap();
    assert_eq!(
        gallery.phase(),
        Phase::Bootstrapping(BootstrapStage::AwaitingEngine)
    );
    assert_eq!(gallery.tick(), FrameOutcome::Halt);

    let delay = gallery.attach_backend(Ok(HeadlessBackend::new())).unwrap();
    assert_eq!(delay, Duration::from_millis(200));
    assert_eq!(gallery.phase(), Phase::Bootstrapping(BootstrapStage::Settling));
    assert_eq!(gallery.tick(), FrameOutcome::Halt);
    assert!(gallery.medias().is_empty());
    assert!(!gallery.status().loaded);

    gallery.finish_settling().unwrap();
    assert_eq!(gallery.phase(), Phase::Running);
    assert!(gallery.status().loaded);
    assert_eq!(gallery.tick(), FrameOutcome::Continue);
    assert_eq!(gallery.backend().unwrap().frames_rendered(), 1);
}

#[test]
fn settle_delay_comes_from_options() {
    let mut options = Options::default();
    options.gallery.settle_delay_ms = 750;
    let layout = layout_for(&options);
    let mut gallery: TestGallery = Gallery::new(options, layout);
    assert_eq!(gallery.settle_delay(), Duration::from_millis(750));
    gallery.start().unwrap();
    let delay = gallery.attach_backend(Ok(HeadlessBackend::new())).unwrap();
    assert_eq!(delay, Duration::from_millis(750));
}

#[test]
fn attach_sizes_surface_and_camera() {
    let options = Options::default();
    let layout = layout_for(&options);
    let mut gallery: TestGallery = Gallery::new(options, layout);
    gallery.start().unwrap();
    let _ = gallery.attach_backend(Ok(HeadlessBackend::new())).unwrap();
    assert_eq!(gallery.backend().unwrap().surface_size(), (1200, 800));
    assert_eq!(gallery.camera().aspect, 1.5);
    assert!(gallery.viewport().gallery_height() > 0.0);
}

#[test]
fn start_twice_is_rejected() {
    let (mut gallery, _) = running(Options::default());
    assert!(matches!(gallery.start(), Err(VitrineError::Lifecycle(_))));
    assert!(matches!(
        gallery.finish_settling(),
        Err(VitrineError::Lifecycle(_))
    ));
}

#[test]
fn failed_engine_surfaces_error() {
    let options = Options::default();
    let layout = layout_for(&options);
    let mut gallery: TestGallery = Gallery::new(options, layout);
    gallery.start().unwrap();
    let result = gallery.attach_backend(Err(VitrineError::EngineLoad(
        "module import rejected".to_owned(),
    )));
    assert!(result.is_err());
    assert_eq!(gallery.phase(), Phase::Failed);
    assert!(!gallery.status().loaded);
    let message = gallery.status().error.clone().unwrap();
    assert!(message.contains("module import rejected"));
    assert_eq!(gallery.tick(), FrameOutcome::Halt);
}

#[test]
fn stop_releases_everything_and_halts() {
    let (mut gallery, _) = running(Options::default());
    assert_eq!(gallery.medias().len(), 6);
    gallery.stop();
    assert_eq!(gallery.phase(), Phase::Stopped);
    assert!(gallery.backend().is_none());
    assert!(gallery.medias().is_empty());
    assert_eq!(gallery.tick(), FrameOutcome::Halt);
    assert!(!gallery.handle_event(InputEvent::Wheel { delta_y: 10.0 }));
    gallery.stop();
    assert_eq!(gallery.phase(), Phase::Stopped);
}

#[test]
fn backend_arriving_after_stop_is_discarded() {
    let options = Options::default();
    let layout = layout_for(&options);
    let mut gallery: TestGallery = Gallery::new(options, layout);
    gallery.start().unwrap();
    gallery.stop();
    let result = gallery.attach_backend(Ok(HeadlessBackend::new()));
    assert!(matches!(result, Err(VitrineError::Lifecycle(_))));
    assert!(gallery.backend().is_none());
    assert_eq!(gallery.phase(), Phase::Stopped);
}

#[test]
fn input_is_ignored_until_running() {
    let options = snappy();
    let layout = layout_for(&options);
    let mut gallery: TestGallery = Gallery::new(options, layout);
    gallery.start().unwrap();
    assert!(!gallery.handle_event(InputEvent::Wheel { delta_y: 100.0 }));
    let _ = gallery.attach_backend(Ok(HeadlessBackend::new())).unwrap();
    assert!(!gallery.handle_event(InputEvent::Wheel { delta_y: 100.0 }));
    assert!(gallery.handle_event(InputEvent::Resized));
    gallery.finish_settling().unwrap();
    assert!(gallery.handle_event(InputEvent::Wheel { delta_y: 100.0 }));
    assert_eq!(gallery.scroll().state().target, 50.0);
}

#[test]
fn slot_without_image_is_skipped() {
    let mut options = Options::default();
    options.images.urls = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    let layout = layout_for(&options).without_image(2);
    let mut gallery = running_with(options, layout);

    let slots: Vec<usize> = gallery.medias().iter().map(|m| m.slot()).collect();
    assert_eq!(slots, vec![0, 1, 3, 4, 5]);

    // URLs follow the slot index, skipped slots included.
    let urls: Vec<String> = gallery
        .take_image_requests()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(urls, vec!["a", "b", "d", "e", "f"]);
    assert!(gallery.take_image_requests().is_empty());
}

#[test]
fn selector_matching_nothing_still_runs() {
    let mut options = Options::default();
    options.gallery.selector = ".missing".to_owned();
    let layout = vitrine::layout::GridLayout::new(
        &options.layout,
        ".image-container",
        common::WINDOW,
    );
    let mut gallery = running_with(options, layout);
    assert!(gallery.medias().is_empty());
    assert_eq!(gallery.tick(), FrameOutcome::Continue);
}

#[test]
fn loaded_image_reaches_texture_and_uniforms() {
    let (mut gallery, _) = running(Options::default());
    let requests = gallery.take_image_requests();
    assert_eq!(requests.len(), 6);
    assert!(requests.iter().all(|r| r.url == "/assets/images/profile.jpg"));

    let image = ImagePixels::new(4, 2, vec![255; 32]).unwrap();
    gallery.image_loaded(requests[1].media, &image).unwrap();
    let media = &gallery.medias()[1];
    assert_eq!(media.image_state(), ImageState::Loaded);
    assert_eq!(media.uniforms().image_sizes, glam::Vec2::new(4.0, 2.0));
    let texture = media.texture();
    assert_eq!(gallery.backend().unwrap().texture_size(texture), Some((4, 2)));

    assert!(gallery.image_loaded(99, &image).is_err());
}

#[test]
fn failed_image_falls_back_once() {
    let (mut gallery, _) = running(Options::default());
    let _ = gallery.take_image_requests();

    assert!(gallery.image_failed(0));
    let retry = gallery.take_image_requests();
    assert_eq!(retry.len(), 1);
    assert_eq!(retry[0].media, 0);
    assert_eq!(retry[0].url, "/assets/images/blank.webp");
    assert_eq!(gallery.medias()[0].image_state(), ImageState::Fallback);

    assert!(!gallery.image_failed(0));
    assert!(gallery.take_image_requests().is_empty());
    assert_eq!(gallery.medias()[0].image_state(), ImageState::Failed);
    // A transparent quad still renders.
    assert_eq!(gallery.tick(), FrameOutcome::Continue);
}

#[test]
fn image_after_stop_is_rejected() {
    let (mut gallery, _) = running(Options::default());
    gallery.stop();
    let image = ImagePixels::new(1, 1, vec![0; 4]).unwrap();
    assert!(matches!(
        gallery.image_loaded(0, &image),
        Err(VitrineError::Lifecycle(_))
    ));
}

/// Backend whose draws fail, e.g. after the GPU context is lost.
#[derive(Default)]
struct LostContext {
    inner: HeadlessBackend,
}

impl RenderBackend for LostContext {
    fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    fn create_texture(&mut self) -> Result<TextureId, VitrineError> {
        self.inner.create_texture()
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        image: &ImagePixels,
    ) -> Result<(), VitrineError> {
        self.inner.upload_texture(texture, image)
    }

    fn create_mesh(&mut self, texture: TextureId) -> Result<MeshId, VitrineError> {
        self.inner.create_mesh(texture)
    }

    fn update_mesh(
        &mut self,
        mesh: MeshId,
        transform: &MeshTransform,
        uniforms: &MediaUniforms,
    ) {
        self.inner.update_mesh(mesh, transform, uniforms);
    }

    fn render(&mut self, _camera: &Camera) -> Result<(), VitrineError> {
        Err(VitrineError::Render("context lost".to_owned()))
    }
}

#[test]
fn frame_error_halts_the_loop() {
    let options = Options::default();
    let layout = layout_for(&options);
    let mut gallery: Gallery<LostContext, _> = Gallery::new(options, layout);
    gallery.start().unwrap();
    let _ = gallery.attach_backend(Ok(LostContext::default())).unwrap();
    gallery.finish_settling().unwrap();

    assert_eq!(gallery.tick(), FrameOutcome::Halt);
    assert_eq!(gallery.phase(), Phase::Failed);
    assert!(gallery.status().error.as_deref().unwrap().contains("context lost"));
    assert_eq!(gallery.tick(), FrameOutcome::Halt);
}
