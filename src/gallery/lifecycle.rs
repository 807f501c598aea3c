use std::time::Duration;

use glam::Vec2;

use super::{BootstrapStage, Gallery, ImageRequest, Phase};
use crate::backend::RenderBackend;
use crate::error::VitrineError;
use crate::input::InputEvent;
use crate::layout::LayoutHost;
use crate::media::{projector, MediaItem};

impl<B: RenderBackend, H: LayoutHost> Gallery<B, H> {
    /// Begin bootstrapping. The host should now create the backend and hand
    /// it to [`Gallery::attach_backend`].
    ///
    /// # Errors
    ///
    /// [`VitrineError::Lifecycle`] unless the gallery is uninitialized.
    pub fn start(&mut self) -> Result<(), VitrineError> {
        if self.phase != Phase::Uninitialized {
            return Err(VitrineError::Lifecycle("start called twice"));
        }
        self.phase = Phase::Bootstrapping(BootstrapStage::AwaitingEngine);
        log::debug!("gallery bootstrapping");
        Ok(())
    }

    /// Deliver the outcome of backend creation.
    ///
    /// On success the surface, camera, and viewport are sized to the host
    /// window and the settle delay the host must wait before calling
    /// [`Gallery::finish_settling`] is returned.
    ///
    /// # Errors
    ///
    /// The backend error itself (the gallery moves to [`Phase::Failed`] and
    /// the message is surfaced in the status), or
    /// [`VitrineError::Lifecycle`] if no backend was expected, e.g. the
    /// gallery was stopped while the backend was being created.
    pub fn attach_backend(
        &mut self,
        backend: Result<B, VitrineError>,
    ) -> Result<Duration, VitrineError> {
        if self.phase != Phase::Bootstrapping(BootstrapStage::AwaitingEngine) {
            return Err(VitrineError::Lifecycle("no backend expected"));
        }
        match backend {
            Ok(backend) => {
                self.backend = Some(backend);
                self.resize();
                self.phase = Phase::Bootstrapping(BootstrapStage::Settling);
                log::info!("backend attached, settling");
                Ok(self.settle_delay())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Create one media item per slot that contains an image, measure them,
    /// and start running.
    ///
    /// # Errors
    ///
    /// [`VitrineError::Lifecycle`] outside the settling stage, or the
    /// backend error if a texture or mesh cannot be created (the gallery
    /// then moves to [`Phase::Failed`]).
    pub fn finish_settling(&mut self) -> Result<(), VitrineError> {
        if self.phase != Phase::Bootstrapping(BootstrapStage::Settling) {
            return Err(VitrineError::Lifecycle("not settling"));
        }
        if let Err(e) = self.create_medias() {
            self.fail(&e);
            return Err(e);
        }
        for item in &mut self.medias {
            projector::refresh_bounds(item, &self.tracker);
        }
        self.phase = Phase::Running;
        self.status.loaded = true;
        log::info!("gallery running with {} media", self.medias.len());
        Ok(())
    }

    fn create_medias(&mut self) -> Result<(), VitrineError> {
        let Some(backend) = self.backend.as_mut() else {
            return Err(VitrineError::Lifecycle("no backend attached"));
        };
        let viewport = self.tracker.viewport();
        let slots = self.host.query_slots(&self.options.gallery.selector);
        if slots.is_empty() {
            log::warn!(
                "no slots match '{}'",
                self.options.gallery.selector
            );
        }

        for (slot, element) in slots.into_iter().enumerate() {
            let Some(image) = self.host.find_image(&element) else {
                log::warn!("slot {slot} has no image element, skipping");
                continue;
            };
            let texture = backend.create_texture()?;
            let mesh = backend.create_mesh(texture)?;
            let mut item = MediaItem::new(element, image, slot, mesh, texture);
            item.uniforms.viewport_sizes =
                Vec2::new(viewport.width, viewport.height);

            if let Some(url) = self.options.images.url_for(slot) {
                self.requests.push(ImageRequest {
                    media: self.medias.len(),
                    url: url.to_owned(),
                });
            }
            self.medias.push(item);
        }
        Ok(())
    }

    /// Tear down: release media items and the backend (and with it every
    /// GPU resource). Idempotent. The host cancels its pending frame and
    /// detaches its listeners alongside.
    pub fn stop(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.medias.clear();
        self.requests.clear();
        self.backend = None;
        self.phase = Phase::Stopped;
        log::debug!("gallery stopped");
    }

    /// Feed an input event.
    ///
    /// Scroll input only counts while running; a resize is honored from the
    /// moment a backend is attached. Returns whether the event was used.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match (event, self.phase) {
            (
                InputEvent::Resized,
                Phase::Running
                | Phase::Bootstrapping(BootstrapStage::Settling),
            ) => {
                self.resize();
                true
            }
            (InputEvent::Resized, _) => false,
            (event, Phase::Running) => event.apply(&mut self.scroll),
            _ => false,
        }
    }

    /// Re-measure everything after the window size changed.
    ///
    /// Wraparound offsets reset to zero: the gallery height they were
    /// accumulated against may have changed.
    fn resize(&mut self) {
        let screen = self.host.window_size();
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(screen.width as u32, screen.height as u32);
        }
        self.camera.set_aspect(screen.width, screen.height);
        self.tracker
            .update(screen, &self.camera, self.host.gallery_rect());

        let viewport = self.tracker.viewport();
        for item in &mut self.medias {
            item.extra = 0.0;
            item.uniforms.viewport_sizes =
                Vec2::new(viewport.width, viewport.height);
            projector::refresh_bounds(item, &self.tracker);
        }
        log::debug!(
            "resized to {}x{}, gallery height {:.3}",
            screen.width,
            screen.height,
            self.tracker.gallery_height()
        );
    }

    pub(super) fn fail(&mut self, error: &VitrineError) {
        log::error!("gallery failed: {error}");
        self.status.error = Some(error.to_string());
        self.phase = Phase::Failed;
    }
}
