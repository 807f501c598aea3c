use glam::{Mat4, Vec3};

use crate::options::CameraOptions;
use crate::viewport::Size;

/// Perspective camera at `(0, 0, distance)` looking down -Z.
///
/// The gallery plane sits at z = 0, so the visible world rectangle there is
/// what [`Camera::viewport_size`] reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub position: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera configured from options with a square aspect until the first
    /// resize.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, options.distance),
            aspect: 1.0,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Update the aspect ratio from a canvas size. Degenerate sizes keep the
    /// previous aspect.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space size of the plane at z = 0 that fills the view.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        let fov = self.fovy.to_radians();
        let height = 2.0 * (fov / 2.0).tan() * self.position.z;
        Size {
            width: height * self.aspect,
            height,
        }
    }

    /// World-to-view matrix. The camera never rotates, so this is a pure
    /// translation.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}
