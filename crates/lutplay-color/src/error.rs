//! Color subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid LUT image: {0}")]
    InvalidLut(String),
    #[error("LUT image must be {expected}x{expected}, got {width}x{height}")]
    DimensionMismatch {
        expected: u32,
        width: u32,
        height: u32,
    },
}
