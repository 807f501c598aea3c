use super::{Gallery, ImageRequest};
use crate::backend::{ImagePixels, RenderBackend};
use crate::error::VitrineError;
use crate::layout::LayoutHost;
use crate::media::ImageState;

impl<B: RenderBackend, H: LayoutHost> Gallery<B, H> {
    /// Drain image loads queued since the last call.
    pub fn take_image_requests(&mut self) -> Vec<ImageRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Upload a decoded image for media `media` and publish its natural
    /// size to the shader.
    ///
    /// # Errors
    ///
    /// [`VitrineError::Lifecycle`] once the gallery has no backend (a load
    /// that finished after stop), [`VitrineError::Image`] for an unknown
    /// media index, or the backend's upload error.
    pub fn image_loaded(
        &mut self,
        media: usize,
        image: &ImagePixels,
    ) -> Result<(), VitrineError> {
        let Some(backend) = self.backend.as_mut() else {
            return Err(VitrineError::Lifecycle("image arrived without a backend"));
        };
        let item = self.medias.get_mut(media).ok_or_else(|| {
            VitrineError::Image(format!("no media item {media}"))
        })?;
        backend.upload_texture(item.texture, image)?;
        item.uniforms.image_sizes = image.size();
        if item.image_state == ImageState::Pending {
            item.image_state = ImageState::Loaded;
        }
        log::debug!(
            "media {media} image {}x{} loaded",
            image.width,
            image.height
        );
        Ok(())
    }

    /// Report that loading media `media`'s image failed.
    ///
    /// The first failure queues the slot's fallback image; a failure of the
    /// fallback leaves the quad transparent. Returns whether a retry was
    /// queued.
    pub fn image_failed(&mut self, media: usize) -> bool {
        let Some(item) = self.medias.get_mut(media) else {
            return false;
        };
        let fallback = match item.image_state {
            ImageState::Pending => self.options.images.fallback_for(item.slot),
            ImageState::Loaded | ImageState::Fallback | ImageState::Failed => {
                None
            }
        };
        match fallback {
            Some(url) => {
                log::warn!("media {media} image failed, trying {url}");
                item.image_state = ImageState::Fallback;
                self.requests.push(ImageRequest {
                    media,
                    url: url.to_owned(),
                });
                true
            }
            None => {
                log::warn!("media {media} has no image to show");
                item.image_state = ImageState::Failed;
                false
            }
        }
    }
}
