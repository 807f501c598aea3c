//! Shared fixtures for gallery integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use vitrine::backend::headless::HeadlessBackend;
use vitrine::layout::GridLayout;
use vitrine::options::Options;
use vitrine::viewport::Size;
use vitrine::Gallery;

/// Window every fixture layout starts at.
pub const WINDOW: Size = Size::new(1200.0, 800.0);

/// Gallery over the headless backend and a grid preset.
pub type TestGallery = Gallery<HeadlessBackend, GridLayout>;

/// Options with no drift and instant easing, so each wheel step lands in
/// exactly one frame.
pub fn snappy() -> Options {
    let mut options = Options::default();
    options.scroll.ambient_speed = 0.0;
    options.scroll.ease = 1.0;
    options
}

/// Grid layout for `options` at [`WINDOW`].
pub fn layout_for(options: &Options) -> GridLayout {
    GridLayout::new(&options.layout, &options.gallery.selector, WINDOW)
}

/// Gallery that went through the whole bootstrap with a headless backend.
pub fn running_with(options: Options, layout: GridLayout) -> TestGallery {
    let mut gallery = Gallery::new(options, layout);
    gallery.start().unwrap();
    let _ = gallery.attach_backend(Ok(HeadlessBackend::new())).unwrap();
    gallery.finish_settling().unwrap();
    gallery
}

/// Running gallery plus a handle to its layout for pushing resizes.
pub fn running(options: Options) -> (TestGallery, GridLayout) {
    let layout = layout_for(&options);
    (running_with(options, layout.clone()), layout)
}
