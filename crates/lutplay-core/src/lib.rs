//! LutPlay Core - Foundation types for the playback engine
//!
//! This crate provides the fundamental types used throughout LutPlay:
//! - Error taxonomy shared by the GPU and player crates
//! - Geometric primitives and the aspect-preserving viewport fitter
//! - RGBA8 image buffers for frames and LUT images
//! - Clock-time formatting for the transport readout

pub mod error;
pub mod geometry;
pub mod image;
pub mod time;

pub use error::{LutPlayError, Result, ShaderStage};
pub use geometry::{fit_viewport, Rect, Vec2};
pub use image::ImageBuffer;
pub use time::{format_clock, include_hours_for};
