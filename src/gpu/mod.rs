//! GPU rendering of media quads.
//!
//! Provides wgpu device/surface initialization, shader composition, the
//! shared plane geometry, image textures, and [`WgpuBackend`], the
//! [`RenderBackend`](crate::backend::RenderBackend) that draws them.

/// wgpu implementation of the render backend.
pub mod backend;
/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// Subdivided plane geometry.
pub mod plane;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Sampled image textures.
pub mod texture;

pub use backend::WgpuBackend;
