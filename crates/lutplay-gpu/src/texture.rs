//! GPU textures for the video frame and the LUT image.

use lutplay_core::ImageBuffer;
use tracing::{debug, trace};

/// Outcome of a texture upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upload {
    /// The source image had no decoded pixels; previous contents remain.
    /// Expected while the first frame is still decoding, not an error.
    Skipped,
    /// Pixels were uploaded. `resized` means the texture was reallocated and
    /// any bind group referencing its view must be rebuilt.
    Done { resized: bool },
}

/// A GPU texture that tracks the dimensions of its image source.
///
/// wgpu textures are fixed-size, so a source dimension change reallocates
/// the texture instead of resizing in place.
pub struct VideoTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
    label: String,
}

impl VideoTexture {
    /// Create a texture of the given size. Zero dimensions are clamped to 1
    /// so the texture is always bindable before the first real upload.
    pub fn new(device: &wgpu::Device, width: u32, height: u32, label: &str) -> Self {
        let width = width.max(1);
        let height = height.max(1);
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
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
            label: label.to_string(),
        }
    }

    /// Current width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replace the texture contents with the image's current pixels.
    ///
    /// A source with zero dimensions is skipped and the previous contents
    /// stay; callers tolerate a black or stale frame until real data
    /// arrives.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImageBuffer,
    ) -> Upload {
        if image.is_empty() {
            trace!(label = %self.label, "upload skipped: source has no decoded pixels");
            return Upload::Skipped;
        }

        let resized = image.width() != self.width || image.height() != self.height;
        if resized {
            debug!(
                label = %self.label,
                from = format_args!("{}x{}", self.width, self.height),
                to = format_args!("{}x{}", image.width(), image.height()),
                "reallocating texture for new source size"
            );
            *self = Self::new(device, image.width(), image.height(), &self.label);
        }

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.data(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(image.stride() as u32),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        Upload::Done { resized }
    }
}
