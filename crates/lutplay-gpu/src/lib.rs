//! LutPlay GPU - wgpu-based LUT rendering pipeline
//!
//! One render pipeline draws the current video frame through the packed LUT
//! image into a caller-supplied target, letterboxed to the source aspect.

pub mod context;
pub mod pipeline;
pub mod texture;

pub use context::GpuContext;
pub use pipeline::LutPipeline;
pub use texture::{Upload, VideoTexture};
