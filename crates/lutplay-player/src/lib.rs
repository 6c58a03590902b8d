//! Playback core for LutPlay: vsync frame scheduling, on-screen control
//! state and the orchestration that ties the media source to the GPU
//! renderer.

pub mod controls;
pub mod player;
pub mod renderer;
pub mod scheduler;
pub mod source;

pub use controls::{BufferedLane, BufferedSegment, ControlsState, FullscreenHost, TransportReadout, AUTO_HIDE_AFTER};
pub use player::{FrameSink, Player};
pub use renderer::{GpuFrameSink, PlayerRenderer};
pub use scheduler::{FrameScheduler, SchedulerState, VsyncDriver};
pub use source::{BufferedRange, PlaybackSource};
