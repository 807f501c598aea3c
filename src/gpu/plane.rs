//! Subdivided unit plane shared by every media quad.
//!
//! The vertex wave bends the quad in view space, so the plane needs
//! interior vertices; 10x10 segments is enough for the curve to read
//! smooth at gallery sizes.

use bytemuck::{Pod, Zeroable};

/// Segments along each axis of the shared plane.
pub const PLANE_SEGMENTS: u32 = 10;

/// Plane vertex: position in the unit square, UV with v = 0 at the top.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    /// Object-space position, `x, y` in `[-0.5, 0.5]`, `z = 0`.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl PlaneVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `VertexInput` in the media shader.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Unit plane with `segments_x * segments_y` quads as an indexed triangle
/// list (counter-clockwise seen from +Z).
#[must_use]
pub fn plane_geometry(
    segments_x: u32,
    segments_y: u32,
) -> (Vec<PlaneVertex>, Vec<u16>) {
    let segments_x = segments_x.max(1);
    let segments_y = segments_y.max(1);
    let columns = segments_x + 1;

    let mut vertices =
        Vec::with_capacity((columns * (segments_y + 1)) as usize);
    for iy in 0..=segments_y {
        let v = iy as f32 / segments_y as f32;
        for ix in 0..=segments_x {
            let u = ix as f32 / segments_x as f32;
            vertices.push(PlaneVertex {
                position: [u - 0.5, 0.5 - v, 0.0],
                uv: [u, v],
            });
        }
    }

    let mut indices =
        Vec::with_capacity((segments_x * segments_y * 6) as usize);
    for iy in 0..segments_y {
        for ix in 0..segments_x {
            let a = (iy * columns + ix) as u16;
            let b = a + 1;
            let c = a + columns as u16;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    (vertices, indices)
}
