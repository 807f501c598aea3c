//! Standalone gallery window backed by winit.
//!
//! Slots come from a grid preset instead of a DOM, images are read from an
//! asset directory, and the wheel, mouse and touch input of the window
//! drive the scroll exactly as the browser host does.
//!
//! ```no_run
//! # use vitrine::Viewer;
//! Viewer::builder()
//!     .with_asset_root("site/public")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    backend::ImagePixels, error::VitrineError, gpu::WgpuBackend,
    layout::GridLayout, options::Options, viewport::Size, FrameOutcome,
    Gallery, InputEvent, Phase,
};

/// Pixels per wheel line, matching what browsers report for one notch.
const LINE_HEIGHT_PX: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    asset_root: PathBuf,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Vitrine", assets in
    /// the working directory, default options).
    fn new() -> Self {
        Self {
            asset_root: PathBuf::from("."),
            options: None,
            title: "Vitrine".into(),
        }
    }

    /// Directory image URLs are resolved against. A leading `/` in a URL
    /// is relative to this root.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            asset_root: self.asset_root,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the gallery.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    asset_root: PathBuf,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`VitrineError::Viewer`] if the event loop cannot be created or
    /// exits abnormally.
    pub fn run(self) -> Result<(), VitrineError> {
        let event_loop = EventLoop::new()
            .map_err(|e| VitrineError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            gallery: None,
            layout: None,
            settle_deadline: None,
            cursor_y: 0.0,
            asset_root: self.asset_root,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VitrineError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    gallery: Option<Gallery<WgpuBackend, GridLayout>>,
    /// Second handle to the gallery's layout host, for pushing resizes.
    layout: Option<GridLayout>,
    /// When media may be created; `None` once settled.
    settle_deadline: Option<Instant>,
    cursor_y: f32,
    asset_root: PathBuf,
    options: Options,
    title: String,
}

fn window_size(inner: winit::dpi::PhysicalSize<u32>) -> Size {
    Size::new(inner.width.max(1) as f32, inner.height.max(1) as f32)
}

/// Resolve an image URL against the asset root.
fn asset_path(root: &Path, url: &str) -> PathBuf {
    root.join(url.trim_start_matches('/'))
}

fn load_image(path: &Path) -> Result<ImagePixels, VitrineError> {
    let bytes = std::fs::read(path)?;
    ImagePixels::decode(&bytes)
}

impl ViewerApp {
    /// Load every queued image, following fallbacks until the queue drains.
    fn load_images(&mut self) {
        let Some(gallery) = self.gallery.as_mut() else {
            return;
        };
        loop {
            let requests = gallery.take_image_requests();
            if requests.is_empty() {
                break;
            }
            for request in requests {
                let path = asset_path(&self.asset_root, &request.url);
                let loaded = load_image(&path).and_then(|image| {
                    gallery.image_loaded(request.media, &image)
                });
                if let Err(e) = loaded {
                    log::warn!("{}: {e}", path.display());
                    let _ = gallery.image_failed(request.media);
                }
            }
        }
    }

    fn settle_if_due(&mut self) {
        let Some(deadline) = self.settle_deadline else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        self.settle_deadline = None;
        let Some(gallery) = self.gallery.as_mut() else {
            return;
        };
        if let Err(e) = gallery.finish_settling() {
            log::error!("gallery could not start: {e}");
            return;
        }
        self.load_images();
    }

    fn send(&mut self, event: InputEvent) {
        if let Some(gallery) = self.gallery.as_mut() {
            let _ = gallery.handle_event(event);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let size = window_size(inner);
        let layout = GridLayout::new(
            &self.options.layout,
            &self.options.gallery.selector,
            size,
        );
        let mut gallery = Gallery::new(self.options.clone(), layout.clone());
        if let Err(e) = gallery.start() {
            log::error!("{e}");
            event_loop.exit();
            return;
        }

        let backend = pollster::block_on(WgpuBackend::create(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
        ));
        match gallery.attach_backend(backend) {
            Ok(delay) => {
                self.settle_deadline = Some(Instant::now() + delay);
                event_loop.set_control_flow(ControlFlow::WaitUntil(
                    Instant::now() + delay,
                ));
            }
            Err(e) => {
                log::error!("Failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        }

        self.gallery = Some(gallery);
        self.layout = Some(layout);
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.settle_deadline.is_some() {
            self.settle_if_due();
            if self.settle_deadline.is_none() {
                event_loop.set_control_flow(ControlFlow::Wait);
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(gallery) = self.gallery.as_mut() {
                    gallery.stop();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(inner) => {
                if let Some(layout) = &self.layout {
                    layout.set_window_size(window_size(inner));
                }
                self.send(InputEvent::Resized);
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(gallery) = self.gallery.as_mut() else {
                    return;
                };
                match gallery.tick() {
                    FrameOutcome::Continue => {
                        if let Some(w) = &self.window {
                            w.request_redraw();
                        }
                    }
                    FrameOutcome::Halt => {
                        if gallery.phase() == Phase::Failed {
                            event_loop.exit();
                        }
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports wheel-up as positive; the gallery takes
                // DOM-style deltas where positive scrolls forward.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.send(InputEvent::Wheel { delta_y });
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let event = match state {
                    ElementState::Pressed => {
                        InputEvent::PointerDown { y: self.cursor_y }
                    }
                    ElementState::Released => InputEvent::PointerUp,
                };
                self.send(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_y = position.y as f32;
                self.send(InputEvent::PointerMove { y: self.cursor_y });
            }

            WindowEvent::Touch(touch) => {
                let y = touch.location.y as f32;
                let event = match touch.phase {
                    TouchPhase::Started => InputEvent::PointerDown { y },
                    TouchPhase::Moved => InputEvent::PointerMove { y },
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        InputEvent::PointerUp
                    }
                };
                self.send(event);
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_urls_resolve_under_asset_root() {
        let root = Path::new("/srv/site");
        assert_eq!(
            asset_path(root, "/assets/images/a.jpg"),
            PathBuf::from("/srv/site/assets/images/a.jpg")
        );
        assert_eq!(
            asset_path(root, "b.png"),
            PathBuf::from("/srv/site/b.png")
        );
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().with_title("t").build();
        assert_eq!(viewer.title, "t");
        assert_eq!(viewer.options, Options::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, VitrineError::Io(_)));
    }
}
