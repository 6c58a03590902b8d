//! Hald-style tiled 2D LUT.
//!
//! A 3D color lookup is packed into one 2D image: an 8×8 grid of 32×32-texel
//! tiles, 256×256 texels total. The red channel selects the tile, blue and
//! green index the position inside it. This trades a dependent texture fetch
//! for not requiring true 3D texture support, at the cost of a round-nearest
//! modulo that keeps tile addressing exact at integer red levels.

use crate::error::ColorError;
use glam::Vec2;
use lutplay_core::ImageBuffer;

/// Side length of the packed LUT image in texels.
pub const LUT_IMAGE_SIZE: u32 = 256;
/// Tiles per row/column of the grid.
pub const TILE_GRID: u32 = 8;
/// Side length of one tile in texels.
pub const TILE_SIZE: u32 = 32;

/// Modulo that rounds to nearest instead of truncating.
///
/// Equal to `a % b` whenever `a` is an exact integer; the rounding keeps
/// tile addressing stable against float error at tile edges.
#[inline]
pub fn round_mod(a: f32, b: f32) -> f32 {
    let m = a - ((a + 0.5) / b).floor() * b;
    (m + 0.5).floor()
}

/// Normalized (row, col) of the tile owning red level `r` in [0, 255].
#[inline]
pub fn tile_coords(r: f32) -> (f32, f32) {
    let row = (r / TILE_SIZE as f32).floor() / TILE_GRID as f32;
    let col = (round_mod(r, TILE_SIZE as f32) / 4.0).floor() / TILE_GRID as f32;
    (row, col)
}

/// Normalized sample position in the packed image for an RGB input.
///
/// Steps: clamp to [0,1]³, select the tile from `round(red·255)`, offset
/// inside the tile by `(blue, green)/8 · (255/256)` — the 255/256 keeps the
/// sample centered within texel boundaries so filtering never reads the
/// adjacent tile — then clamp the final position to [0,1]².
pub fn sample_pos(rgb: [f32; 3]) -> Vec2 {
    let r = rgb[0].clamp(0.0, 1.0);
    let g = rgb[1].clamp(0.0, 1.0);
    let b = rgb[2].clamp(0.0, 1.0);

    let bg = Vec2::new(b, g) / TILE_GRID as f32 * (255.0 / 256.0);
    let level = (r * 255.0).round();
    let (row, col) = tile_coords(level);

    (Vec2::new(col, row) + bg).clamp(Vec2::ZERO, Vec2::ONE)
}

/// A validated packed LUT image.
#[derive(Debug, Clone)]
pub struct HaldLut {
    image: ImageBuffer,
}

impl HaldLut {
    /// Wrap a LUT image, validating its dimensions.
    pub fn from_image(image: ImageBuffer) -> Result<Self, ColorError> {
        if image.is_empty() {
            return Err(ColorError::InvalidLut("image has no pixels".into()));
        }
        if image.width() != LUT_IMAGE_SIZE || image.height() != LUT_IMAGE_SIZE {
            return Err(ColorError::DimensionMismatch {
                expected: LUT_IMAGE_SIZE,
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self { image })
    }

    /// Generate the identity grade: applying it leaves colors unchanged (to
    /// within the 64-level red quantization of the packed encoding).
    pub fn identity() -> Self {
        let mut image = ImageBuffer::new(LUT_IMAGE_SIZE, LUT_IMAGE_SIZE);
        let tiles = TILE_GRID * TILE_GRID;
        for y in 0..LUT_IMAGE_SIZE {
            for x in 0..LUT_IMAGE_SIZE {
                let tile_row = y / TILE_SIZE;
                let tile_col = x / TILE_SIZE;
                let tile_index = tile_row * TILE_GRID + tile_col;
                let fx = x % TILE_SIZE;
                let fy = y % TILE_SIZE;

                let red = (tile_index as f32 / (tiles - 1) as f32 * 255.0).round() as u8;
                let green = (fy as f32 / (TILE_SIZE - 1) as f32 * 255.0).round() as u8;
                let blue = (fx as f32 / (TILE_SIZE - 1) as f32 * 255.0).round() as u8;
                image.set_pixel(x, y, [red, green, blue, 255]);
            }
        }
        Self { image }
    }

    /// The packed image, ready for texture upload.
    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    /// CPU reference of the fragment-stage transform, nearest sampling.
    ///
    /// Ground truth for the WGSL path; alpha is forced to 1 there, so only
    /// RGB is produced here.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let pos = sample_pos(rgb);
        // Nearest filtering: texel index floor(u * size), clamped.
        let max = LUT_IMAGE_SIZE - 1;
        let x = ((pos.x * LUT_IMAGE_SIZE as f32) as u32).min(max);
        let y = ((pos.y * LUT_IMAGE_SIZE as f32) as u32).min(max);
        let [r, g, b, _] = self.image.pixel(x, y);
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}
