//! The wgpu-backed [`FrameSink`].
//!
//! `PlayerRenderer` owns the pipeline and textures; a short-lived
//! [`GpuFrameSink`] borrows it together with the frame's render target, since
//! the target view changes every frame on a swapchain.

use crate::player::FrameSink;
use lutplay_color::HaldLut;
use lutplay_core::{ImageBuffer, Rect, Result};
use lutplay_gpu::{GpuContext, LutPipeline, Upload, VideoTexture};
use std::sync::Arc;
use tracing::debug;

/// GPU resources for drawing graded video frames.
pub struct PlayerRenderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pipeline: LutPipeline,
    frame: VideoTexture,
    lut: VideoTexture,
    bind_group: wgpu::BindGroup,
}

impl PlayerRenderer {
    /// Build the pipeline and seed the LUT slot with the identity grade, so
    /// frames render unmodified until a real LUT loads.
    pub fn new(context: &GpuContext, target_format: wgpu::TextureFormat) -> Result<Self> {
        let device = Arc::clone(&context.device);
        let queue = Arc::clone(&context.queue);

        let pipeline = LutPipeline::new(&device, target_format)?;
        let frame = VideoTexture::new(&device, 1, 1, "lutplay-frame");
        let mut lut = VideoTexture::new(&device, 1, 1, "lutplay-lut");
        lut.upload(&device, &queue, HaldLut::identity().image());

        let bind_group = pipeline.create_bind_group(&device, &frame.view, &lut.view);
        debug!(format = ?target_format, "player renderer ready");

        Ok(Self {
            device,
            queue,
            pipeline,
            frame,
            lut,
            bind_group,
        })
    }

    /// Borrow a sink that renders into `target` for one frame.
    pub fn sink<'a>(&'a mut self, target: &'a wgpu::TextureView) -> GpuFrameSink<'a> {
        GpuFrameSink {
            renderer: self,
            target,
        }
    }

    fn rebuild_bind_group(&mut self) {
        self.bind_group =
            self.pipeline
                .create_bind_group(&self.device, &self.frame.view, &self.lut.view);
    }
}

/// Per-frame view of a [`PlayerRenderer`] aimed at one render target.
pub struct GpuFrameSink<'a> {
    renderer: &'a mut PlayerRenderer,
    target: &'a wgpu::TextureView,
}

impl FrameSink for GpuFrameSink<'_> {
    fn upload_frame(&mut self, image: &ImageBuffer) -> Upload {
        let r = &mut *self.renderer;
        let outcome = r.frame.upload(&r.device, &r.queue, image);
        if outcome == (Upload::Done { resized: true }) {
            r.rebuild_bind_group();
        }
        outcome
    }

    fn upload_lut(&mut self, image: &ImageBuffer) -> Upload {
        let r = &mut *self.renderer;
        let outcome = r.lut.upload(&r.device, &r.queue, image);
        if outcome == (Upload::Done { resized: true }) {
            r.rebuild_bind_group();
        }
        outcome
    }

    fn draw(&mut self, viewport: Rect) -> Result<()> {
        let r = &mut *self.renderer;
        r.pipeline.write_params(&r.queue, viewport);

        let mut encoder = r
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lutplay-frame-encoder"),
            });
        r.pipeline
            .draw(&mut encoder, self.target, &r.bind_group, viewport);
        r.queue.submit(Some(encoder.finish()));
        Ok(())
    }
}
