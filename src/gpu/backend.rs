//! wgpu implementation of [`RenderBackend`].
//!
//! One pipeline, one shared plane, and per mesh a uniform buffer plus a
//! bind group tying it to its texture. Quads draw in creation order with
//! alpha blending and no depth test, over a transparent clear.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat};
use wgpu::util::DeviceExt;

use super::pipeline_helpers::{
    filtering_sampler, linear_sampler, texture_2d, uniform_buffer,
};
use super::plane::{plane_geometry, PlaneVertex, PLANE_SEGMENTS};
use super::render_context::RenderContext;
use super::shader_composer::{ShaderComposer, MEDIA_SHADER};
use super::texture::ImageTexture;
use crate::backend::{
    ImagePixels, MediaUniforms, MeshId, MeshTransform, RenderBackend,
    TextureId,
};
use crate::camera::Camera;
use crate::error::VitrineError;

/// GPU copy of `MediaUniforms` in the media shader module.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct MediaBlock {
    model_view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    plane_sizes: [f32; 2],
    image_sizes: [f32; 2],
    viewport_sizes: [f32; 2],
    strength: f32,
    _pad: f32,
}

impl MediaBlock {
    fn new(
        view: Mat4,
        projection: Mat4,
        transform: &MeshTransform,
        uniforms: &MediaUniforms,
    ) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            transform.scale,
            Quat::IDENTITY,
            transform.position,
        );
        Self {
            model_view: (view * model).to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            plane_sizes: uniforms.plane_sizes.to_array(),
            image_sizes: uniforms.image_sizes.to_array(),
            viewport_sizes: uniforms.viewport_sizes.to_array(),
            strength: uniforms.strength,
            _pad: 0.0,
        }
    }
}

struct GpuMesh {
    texture: TextureId,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    transform: MeshTransform,
    uniforms: MediaUniforms,
}

/// Draws media quads to a window or canvas surface.
pub struct WgpuBackend {
    context: RenderContext,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    textures: Vec<ImageTexture>,
    meshes: Vec<GpuMesh>,
}

impl WgpuBackend {
    /// Bring up a render context on `target` and build the media pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Gpu`] if no adapter/device/surface can be
    /// obtained, or [`VitrineError::EngineLoad`] if shaders fail to compose.
    pub async fn create(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, VitrineError> {
        let context = RenderContext::new(target, size).await?;
        Self::new(context)
    }

    /// Build the media pipeline on an existing context.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::EngineLoad`] if shaders fail to compose.
    pub fn new(context: RenderContext) -> Result<Self, VitrineError> {
        let mut composer = ShaderComposer::new()?;
        let shader = composer.compose(
            &context.device,
            "Media Shader",
            MEDIA_SHADER,
            "media.wgsl",
        )?;

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Media Layout"),
                entries: &[
                    uniform_buffer(0),
                    texture_2d(1),
                    filtering_sampler(2),
                ],
            },
        );
        let pipeline =
            Self::create_pipeline(&context, &shader, &bind_group_layout);
        let sampler = linear_sampler(&context.device, "Media Sampler");

        let (vertices, indices) =
            plane_geometry(PLANE_SEGMENTS, PLANE_SEGMENTS);
        let vertex_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Plane Vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Plane Indices"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        Ok(Self {
            context,
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            textures: Vec::new(),
            meshes: Vec::new(),
        })
    }

    /// The underlying render context.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    fn create_pipeline(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Media Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            },
        );
        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Media Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[PlaneVertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    fn create_bind_group(
        &self,
        buffer: &wgpu::Buffer,
        texture: &ImageTexture,
    ) -> wgpu::BindGroup {
        self.context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Media Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                ],
            })
    }

    fn texture(&self, id: TextureId) -> Result<&ImageTexture, VitrineError> {
        self.textures.get(id.0 as usize).ok_or_else(|| {
            VitrineError::Render(format!("unknown texture {}", id.0))
        })
    }
}

impl RenderBackend for WgpuBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    fn create_texture(&mut self) -> Result<TextureId, VitrineError> {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(ImageTexture::placeholder(
            &self.context.device,
            &self.context.queue,
        ));
        Ok(id)
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        image: &ImagePixels,
    ) -> Result<(), VitrineError> {
        let _ = self.texture(texture)?;
        let uploaded = ImageTexture::from_pixels(
            &self.context.device,
            &self.context.queue,
            image,
        );
        log::debug!(
            "texture {} uploaded ({}x{})",
            texture.0,
            image.width,
            image.height
        );
        self.textures[texture.0 as usize] = uploaded;

        // Bind groups hold the old view; rebuild the ones sampling it.
        let rebuilt: Vec<(usize, wgpu::BindGroup)> = self
            .meshes
            .iter()
            .enumerate()
            .filter(|(_, mesh)| mesh.texture == texture)
            .map(|(i, mesh)| {
                let view = &self.textures[texture.0 as usize];
                (i, self.create_bind_group(&mesh.uniform_buffer, view))
            })
            .collect();
        for (i, bind_group) in rebuilt {
            self.meshes[i].bind_group = bind_group;
        }
        Ok(())
    }

    fn create_mesh(&mut self, texture: TextureId) -> Result<MeshId, VitrineError> {
        let image = self.texture(texture)?;
        let uniform_buffer =
            self.context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Media Uniforms"),
                size: size_of::<MediaBlock>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        let bind_group = self.create_bind_group(&uniform_buffer, image);
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            texture,
            uniform_buffer,
            bind_group,
            transform: MeshTransform::default(),
            uniforms: MediaUniforms::default(),
        });
        Ok(id)
    }

    fn update_mesh(
        &mut self,
        mesh: MeshId,
        transform: &MeshTransform,
        uniforms: &MediaUniforms,
    ) {
        if let Some(entry) = self.meshes.get_mut(mesh.0 as usize) {
            entry.transform = *transform;
            entry.uniforms = *uniforms;
        }
    }

    fn render(&mut self, camera: &Camera) -> Result<(), VitrineError> {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface outdated, reconfiguring");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(VitrineError::Render(e.to_string())),
        };

        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        for mesh in &self.meshes {
            let block =
                MediaBlock::new(view, projection, &mesh.transform, &mesh.uniforms);
            self.context.queue.write_buffer(
                &mesh.uniform_buffer,
                0,
                bytemuck::bytes_of(&block),
            );
        }

        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Media Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    wgpu::Color::TRANSPARENT,
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(
                self.index_buffer.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            for mesh in &self.meshes {
                pass.set_bind_group(0, &mesh.bind_group, &[]);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // Two mat4 (128) + three vec2 (24) + strength + pad.
        assert_eq!(size_of::<MediaBlock>(), 160);
    }

    #[test]
    fn block_carries_model_view_translation() {
        let camera = Camera::default();
        let transform = MeshTransform {
            position: glam::Vec3::new(1.0, -2.0, 0.0),
            scale: glam::Vec3::new(2.0, 3.0, 1.0),
        };
        let block = MediaBlock::new(
            camera.view_matrix(),
            camera.projection_matrix(),
            &transform,
            &MediaUniforms::default(),
        );
        let translation = block.model_view[3];
        assert_eq!(translation[0], 1.0);
        assert_eq!(translation[1], -2.0);
        assert_eq!(translation[2], -camera.position.z);
        assert_eq!(block.model_view[0][0], 2.0);
        assert_eq!(block.model_view[1][1], 3.0);
    }
}
