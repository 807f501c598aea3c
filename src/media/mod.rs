//! Media registry: one textured quad per laid-out gallery slot.
//!
//! A [`MediaItem`] pairs the host elements it mirrors with the backend
//! mesh that draws it, plus the CPU-side transform and uniforms pushed to
//! that mesh every frame. [`projector`] maps slot rectangles into world
//! space and [`wrap`] recycles quads that leave the viewport.

/// Screen-to-world placement of media quads.
pub mod projector;
/// Wraparound of quads that scroll out of view.
pub mod wrap;

pub use crate::backend::{MediaUniforms, MeshTransform};
use crate::backend::{MeshId, TextureId};
use crate::layout::Rect;

/// Load state of the image a media item samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageState {
    /// Requested, not yet delivered. The quad draws transparent.
    #[default]
    Pending,
    /// The primary image is on the texture.
    Loaded,
    /// The primary image failed; the fallback was requested or is shown.
    Fallback,
    /// Both primary and fallback failed. The quad stays transparent.
    Failed,
}

/// One gallery image and the quad that renders it.
#[derive(Debug, Clone)]
pub struct MediaItem<E> {
    pub(crate) element: E,
    pub(crate) image: E,
    pub(crate) slot: usize,
    pub(crate) mesh: MeshId,
    pub(crate) texture: TextureId,
    pub(crate) transform: MeshTransform,
    pub(crate) uniforms: MediaUniforms,
    pub(crate) bounds: Option<Rect>,
    pub(crate) extra: f32,
    pub(crate) image_state: ImageState,
}

impl<E> MediaItem<E> {
    /// New item for slot `slot` with no bounds and no wraparound offset.
    #[must_use]
    pub fn new(
        element: E,
        image: E,
        slot: usize,
        mesh: MeshId,
        texture: TextureId,
    ) -> Self {
        Self {
            element,
            image,
            slot,
            mesh,
            texture,
            transform: MeshTransform::default(),
            uniforms: MediaUniforms::default(),
            bounds: None,
            extra: 0.0,
            image_state: ImageState::Pending,
        }
    }

    /// Slot element this quad mirrors.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Image element found inside the slot.
    #[must_use]
    pub fn image_element(&self) -> &E {
        &self.image
    }

    /// Position of the slot among all matched slots, including ones skipped
    /// for lacking an image. Selects the image URL.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Backend mesh handle.
    #[must_use]
    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    /// Backend texture handle.
    #[must_use]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Transform pushed on the last frame.
    #[must_use]
    pub fn transform(&self) -> &MeshTransform {
        &self.transform
    }

    /// Uniforms pushed on the last frame.
    #[must_use]
    pub fn uniforms(&self) -> &MediaUniforms {
        &self.uniforms
    }

    /// Last measured slot rectangle.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Accumulated wraparound offset in world units. Always a whole
    /// multiple of the gallery height it was accumulated against.
    #[must_use]
    pub fn extra(&self) -> f32 {
        self.extra
    }

    /// Image load state.
    #[must_use]
    pub fn image_state(&self) -> ImageState {
        self.image_state
    }
}
