//! RGBA8 image buffers for frames and LUT images in CPU memory.
//!
//! The upload path accepts exactly one layout: packed RGBA8 rows with a
//! stride that may carry padding. Decoded video frames and LUT images both
//! arrive in this form from the host's decode layer.

use serde::{Deserialize, Serialize};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 image with row stride.
///
/// An image with either dimension zero is the "not yet decoded" state: it
/// carries no pixels and uploads of it are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a zeroed image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        // Align stride to 64 bytes for GPU copy compatibility.
        let min_stride = width as usize * BYTES_PER_PIXEL;
        let stride = (min_stride + 63) & !63;
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height as usize],
        }
    }

    /// Wrap existing pixel data. `data` must hold `stride * height` bytes
    /// and `stride` must cover a full row of pixels.
    pub fn from_raw(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Option<Self> {
        if stride < width as usize * BYTES_PER_PIXEL || data.len() < stride * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// The empty (zero-dimension) image.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including padding.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw pixel bytes, row-major with stride.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True when either dimension is zero (no decoded pixels yet).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get one row of pixels, without stride padding.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Get one row mutably.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        &mut self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Read the RGBA value at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let row = self.row(y);
        let i = x as usize * BYTES_PER_PIXEL;
        [row[i], row[i + 1], row[i + 2], row[i + 3]]
    }

    /// Write the RGBA value at (x, y).
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let row = self.row_mut(y);
        let i = x as usize * BYTES_PER_PIXEL;
        row[i..i + 4].copy_from_slice(&rgba);
    }

    /// Create a color-bars test pattern (8 vertical bars).
    pub fn test_pattern(width: u32, height: u32) -> Self {
        const BARS: [[u8; 4]; 8] = [
            [255, 255, 255, 255], // White
            [255, 255, 0, 255],   // Yellow
            [0, 255, 255, 255],   // Cyan
            [0, 255, 0, 255],     // Green
            [255, 0, 255, 255],   // Magenta
            [255, 0, 0, 255],     // Red
            [0, 0, 255, 255],     // Blue
            [0, 0, 0, 255],       // Black
        ];

        let mut image = Self::new(width, height);
        for y in 0..height {
            let row = image.row_mut(y);
            for x in 0..width {
                let bar = (x * 8 / width) as usize;
                let i = x as usize * BYTES_PER_PIXEL;
                row[i..i + 4].copy_from_slice(&BARS[bar]);
            }
        }
        image
    }
}
