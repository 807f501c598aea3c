//! Backend that keeps mesh state in memory and draws nothing.
//!
//! Used by tests and by hosts that want to run the layout/scroll pipeline
//! without a GPU (layout previews, server-side checks).

use rustc_hash::FxHashMap;

use super::{
    ImagePixels, MediaUniforms, MeshId, MeshTransform, RenderBackend,
    TextureId,
};
use crate::camera::Camera;
use crate::error::VitrineError;

/// Last state pushed for one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessMesh {
    /// Texture the mesh samples.
    pub texture: TextureId,
    /// Transform from the last `update_mesh`.
    pub transform: MeshTransform,
    /// Uniforms from the last `update_mesh`.
    pub uniforms: MediaUniforms,
}

/// In-memory [`RenderBackend`].
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    surface: (u32, u32),
    textures: Vec<Option<(u32, u32)>>,
    meshes: FxHashMap<MeshId, HeadlessMesh>,
    next_mesh: u32,
    frames: u64,
    last_camera: Option<Camera>,
}

impl HeadlessBackend {
    /// Empty backend with a zero-sized surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size from the last resize.
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    /// Number of `render` calls so far.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Mesh state by handle.
    #[must_use]
    pub fn mesh(&self, id: MeshId) -> Option<&HeadlessMesh> {
        self.meshes.get(&id)
    }

    /// Number of live meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Uploaded size of a texture, `None` while still a placeholder.
    #[must_use]
    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(id.0 as usize).copied().flatten()
    }

    /// Camera passed to the last `render`.
    #[must_use]
    pub fn last_camera(&self) -> Option<&Camera> {
        self.last_camera.as_ref()
    }
}

impl RenderBackend for HeadlessBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }

    fn create_texture(&mut self) -> Result<TextureId, VitrineError> {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(None);
        Ok(id)
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        image: &ImagePixels,
    ) -> Result<(), VitrineError> {
        let slot = self
            .textures
            .get_mut(texture.0 as usize)
            .ok_or_else(|| VitrineError::Image(format!("unknown texture {}", texture.0)))?;
        *slot = Some((image.width, image.height));
        Ok(())
    }

    fn create_mesh(&mut self, texture: TextureId) -> Result<MeshId, VitrineError> {
        if texture.0 as usize >= self.textures.len() {
            return Err(VitrineError::Render(format!(
                "mesh references unknown texture {}",
                texture.0
            )));
        }
        let id = MeshId(self.next_mesh);
        self.next_mesh += 1;
        let _ = self.meshes.insert(
            id,
            HeadlessMesh {
                texture,
                transform: MeshTransform::default(),
                uniforms: MediaUniforms::default(),
            },
        );
        Ok(id)
    }

    fn update_mesh(
        &mut self,
        mesh: MeshId,
        transform: &MeshTransform,
        uniforms: &MediaUniforms,
    ) {
        if let Some(entry) = self.meshes.get_mut(&mesh) {
            entry.transform = *transform;
            entry.uniforms = *uniforms;
        }
    }

    fn render(&mut self, camera: &Camera) -> Result<(), VitrineError> {
        self.frames += 1;
        self.last_camera = Some(camera.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meshes_record_pushed_state() {
        let mut backend = HeadlessBackend::new();
        let texture = backend.create_texture().unwrap();
        let mesh = backend.create_mesh(texture).unwrap();
        let transform = MeshTransform {
            position: glam::Vec3::new(1.0, 2.0, 0.0),
            scale: glam::Vec3::new(0.5, 0.5, 1.0),
        };
        let uniforms = MediaUniforms {
            strength: 3.0,
            ..MediaUniforms::default()
        };
        backend.update_mesh(mesh, &transform, &uniforms);
        let recorded = backend.mesh(mesh).unwrap();
        assert_eq!(recorded.transform, transform);
        assert_eq!(recorded.uniforms.strength, 3.0);
    }

    #[test]
    fn mesh_needs_existing_texture() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.create_mesh(TextureId(4)).is_err());
    }

    #[test]
    fn upload_records_size() {
        let mut backend = HeadlessBackend::new();
        let texture = backend.create_texture().unwrap();
        assert_eq!(backend.texture_size(texture), None);
        let image = ImagePixels::new(2, 1, vec![0; 8]).unwrap();
        backend.upload_texture(texture, &image).unwrap();
        assert_eq!(backend.texture_size(texture), Some((2, 1)));
    }
}
