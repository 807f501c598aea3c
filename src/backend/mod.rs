//! Injected rendering capability.
//!
//! The gallery core computes transforms and uniforms on the CPU and hands
//! them to a [`RenderBackend`], which owns the renderer, the shared plane
//! geometry, one program instance and one texture per mesh. Keeping the
//! seam here lets the whole scroll/layout/wraparound pipeline run without
//! a GPU: [`headless::HeadlessBackend`] records instead of drawing.

/// Backend that records mesh state without touching a GPU.
pub mod headless;

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::error::VitrineError;

/// Handle to a texture owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Handle to a mesh (plane + program + texture) owned by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// World-space placement of a mesh. The camera looks straight down -Z, so
/// only position and scale are ever set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransform {
    /// Center of the quad.
    pub position: Vec3,
    /// Quad extent; the unit plane is scaled to this.
    pub scale: Vec3,
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Per-mesh shader inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MediaUniforms {
    /// Quad size in world units (`uPlaneSizes`).
    pub plane_sizes: Vec2,
    /// Natural image size in pixels, zero until loaded (`uImageSizes`).
    pub image_sizes: Vec2,
    /// Viewport size in world units (`uViewportSizes`).
    pub viewport_sizes: Vec2,
    /// Velocity-driven distortion (`uStrength`).
    pub strength: f32,
}

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePixels {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl ImagePixels {
    /// Wrap raw RGBA8 data, checking its length.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, VitrineError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(VitrineError::Image(format!(
                "{width}x{height} image needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Decode a PNG/JPEG/WebP byte stream.
    #[cfg(any(feature = "viewer", feature = "web"))]
    pub fn decode(bytes: &[u8]) -> Result<Self, VitrineError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| VitrineError::Image(e.to_string()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Natural size as a vector, for the image-size uniform.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The rendering capability set the gallery drives.
///
/// Calls arrive from a single thread in frame order: `update_mesh` for
/// every mesh, then one `render`.
pub trait RenderBackend {
    /// Resize the drawing surface to the window size in pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Create an empty (transparent placeholder) texture.
    fn create_texture(&mut self) -> Result<TextureId, VitrineError>;

    /// Replace a texture's contents with a decoded image.
    fn upload_texture(
        &mut self,
        texture: TextureId,
        image: &ImagePixels,
    ) -> Result<(), VitrineError>;

    /// Create a plane mesh sampling `texture`, added to the scene.
    fn create_mesh(&mut self, texture: TextureId) -> Result<MeshId, VitrineError>;

    /// Set a mesh's transform and shader inputs for the next draw.
    fn update_mesh(
        &mut self,
        mesh: MeshId,
        transform: &MeshTransform,
        uniforms: &MediaUniforms,
    );

    /// Draw every mesh through `camera`.
    fn render(&mut self, camera: &Camera) -> Result<(), VitrineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_length_is_checked() {
        assert!(ImagePixels::new(2, 2, vec![0; 16]).is_ok());
        assert!(ImagePixels::new(2, 2, vec![0; 15]).is_err());
        assert!(ImagePixels::new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn size_reports_natural_dimensions() {
        let image = ImagePixels::new(3, 1, vec![255; 12]).unwrap();
        assert_eq!(image.size(), Vec2::new(3.0, 1.0));
    }
}
