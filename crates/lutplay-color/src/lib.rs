//! LutPlay Color — Hald-style tiled 2D LUT encoding and reference math.

pub mod error;
pub mod lut;

pub use error::ColorError;
pub use lut::{
    round_mod, sample_pos, tile_coords, HaldLut, LUT_IMAGE_SIZE, TILE_GRID, TILE_SIZE,
};
