//! The gallery controller.
//!
//! [`Gallery`] owns scroll state, the camera, viewport measurements, the
//! media registry and the injected backend, and walks them through a
//! fixed lifecycle:
//!
//! ```text
//! Uninitialized --start--> Bootstrapping(AwaitingEngine)
//!     --attach_backend(Ok)--> Bootstrapping(Settling)
//!     --finish_settling--> Running --tick--> Running ...
//! any --stop--> Stopped        bootstrap/frame error --> Failed
//! ```
//!
//! Hosts own the clock: they create the backend, wait out the settle
//! delay, call [`Gallery::tick`] once per display frame and feed
//! [`InputEvent`]s in between.

mod frame;
mod images;
mod lifecycle;

use std::time::Duration;

use crate::backend::RenderBackend;
use crate::camera::Camera;
use crate::layout::LayoutHost;
use crate::media::MediaItem;
use crate::options::Options;
use crate::scroll::ScrollController;
use crate::viewport::ViewportTracker;
#[cfg(doc)]
use crate::InputEvent;

/// Sub-stage of bootstrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    /// Waiting for the host to deliver a backend.
    AwaitingEngine,
    /// Backend attached; waiting for host layout to settle before media
    /// items are created.
    Settling,
}

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Constructed, nothing started.
    #[default]
    Uninitialized,
    /// Backend creation or settle delay in progress.
    Bootstrapping(BootstrapStage),
    /// Media exist and frames are being produced.
    Running,
    /// Torn down by the host. Terminal.
    Stopped,
    /// Bootstrap or a frame failed. Terminal; see [`GalleryStatus::error`].
    Failed,
}

/// What a frame asks of the host's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame.
    Continue,
    /// Do not schedule again.
    Halt,
}

/// Status observable by the embedding page or app.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryStatus {
    /// Media items exist and the frame loop may run.
    pub loaded: bool,
    /// Terminal error message, if bootstrap or a frame failed.
    pub error: Option<String>,
}

/// An image the host must fetch and hand back through
/// [`Gallery::image_loaded`] or [`Gallery::image_failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Index into [`Gallery::medias`].
    pub media: usize,
    /// URL (or asset path) to load.
    pub url: String,
}

/// Scroll-driven, infinitely looping image gallery.
pub struct Gallery<B: RenderBackend, H: LayoutHost> {
    options: Options,
    host: H,
    phase: Phase,
    status: GalleryStatus,
    backend: Option<B>,
    camera: Camera,
    tracker: ViewportTracker,
    scroll: ScrollController,
    medias: Vec<MediaItem<H::Element>>,
    requests: Vec<ImageRequest>,
}

impl<B: RenderBackend, H: LayoutHost> Gallery<B, H> {
    /// Gallery over `host`, not yet started.
    #[must_use]
    pub fn new(options: Options, host: H) -> Self {
        Self {
            camera: Camera::new(&options.camera),
            scroll: ScrollController::new(options.scroll),
            options,
            host,
            phase: Phase::Uninitialized,
            status: GalleryStatus::default(),
            backend: None,
            tracker: ViewportTracker::default(),
            medias: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Loaded flag and terminal error.
    #[must_use]
    pub fn status(&self) -> &GalleryStatus {
        &self.status
    }

    /// Options the gallery was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Delay between backend attachment and media creation.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.options.gallery.settle_delay_ms))
    }

    /// Layout host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Scroll state and drift.
    #[must_use]
    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    /// Screen, viewport, and gallery-height measurements.
    #[must_use]
    pub fn viewport(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// Camera the backend draws through.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Media items in slot order (slots without an image are absent).
    #[must_use]
    pub fn medias(&self) -> &[MediaItem<H::Element>] {
        &self.medias
    }

    /// Attached backend, if bootstrapping got that far and the gallery has
    /// not been stopped.
    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Mutable access to the attached backend.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }
}
