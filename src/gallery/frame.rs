use super::{FrameOutcome, Gallery, Phase};
use crate::backend::RenderBackend;
use crate::layout::LayoutHost;
use crate::media::{projector, wrap};

impl<B: RenderBackend, H: LayoutHost> Gallery<B, H> {
    /// Produce one frame.
    ///
    /// Advances the eased scroll (which also settles direction and drift),
    /// derives the distortion strength from this frame's movement, places
    /// every quad, applies wraparound, draws, and closes the frame with
    /// `last = current`. Outside [`Phase::Running`] nothing happens and
    /// [`FrameOutcome::Halt`] is returned.
    pub fn tick(&mut self) -> FrameOutcome {
        if self.phase != Phase::Running {
            return FrameOutcome::Halt;
        }
        let Some(backend) = self.backend.as_mut() else {
            return FrameOutcome::Halt;
        };

        self.scroll.advance();
        let strength = self.options.distortion.strength(
            self.scroll.state().delta(),
            self.tracker.screen().width,
        );

        let offset = self.scroll.offset();
        let direction = self.scroll.direction();
        let viewport_height = self.tracker.viewport().height;
        let gallery_height = self.tracker.gallery_height();
        for item in &mut self.medias {
            projector::place(item, &self.tracker, offset);
            if wrap::apply(item, viewport_height, direction, gallery_height) {
                log::trace!("slot {} recycled, extra {:.3}", item.slot, item.extra);
            }
            item.uniforms.strength = strength;
            backend.update_mesh(item.mesh, &item.transform, &item.uniforms);
        }

        if let Err(e) = backend.render(&self.camera) {
            self.fail(&e);
            return FrameOutcome::Halt;
        }

        self.scroll.commit();
        FrameOutcome::Continue
    }
}
