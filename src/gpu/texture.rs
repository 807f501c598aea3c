//! Image textures sampled by media quads.

use crate::backend::ImagePixels;

/// Format used for gallery images. Color-managed so sampling returns
/// linear values and the sRGB surface re-encodes them.
pub const IMAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A sampled image texture and its default view.
pub struct ImageTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Pixel size.
    pub size: (u32, u32),
}

impl ImageTexture {
    /// 1x1 transparent texture shown until an image arrives.
    #[must_use]
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture = Self::allocate(device, 1, 1, "Media Placeholder");
        texture.write(queue, &[0, 0, 0, 0]);
        texture
    }

    /// Texture holding a decoded image.
    #[must_use]
    pub fn from_pixels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImagePixels,
    ) -> Self {
        let texture =
            Self::allocate(device, image.width, image.height, "Media Image");
        texture.write(queue, &image.rgba);
        texture
    }

    fn allocate(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: IMAGE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size: (width, height),
        }
    }

    fn write(&self, queue: &wgpu::Queue, rgba: &[u8]) {
        let (width, height) = self.size;
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }
}
