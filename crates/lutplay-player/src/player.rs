//! Player orchestration.
//!
//! `Player` owns the scheduler and control-surface state and reacts to the
//! host's notifications and input events. Rendering goes through the
//! [`FrameSink`] seam so the state machinery stays testable without a GPU.

use crate::controls::{self, BufferedLane, ControlsState, FullscreenHost, TransportReadout};
use crate::scheduler::{FrameScheduler, SchedulerState, VsyncDriver};
use crate::source::PlaybackSource;
use lutplay_color::HaldLut;
use lutplay_core::{fit_viewport, ImageBuffer, Rect, Result};
use lutplay_gpu::Upload;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Where rendered frames go. The wgpu implementation lives in
/// [`crate::renderer`]; tests substitute a recording sink.
pub trait FrameSink {
    /// Upload the current video frame. Empty sources are skipped.
    fn upload_frame(&mut self, image: &ImageBuffer) -> Upload;
    /// Upload a packed LUT image.
    fn upload_lut(&mut self, image: &ImageBuffer) -> Upload;
    /// Draw the frame into the fitted viewport rect.
    fn draw(&mut self, viewport: Rect) -> Result<()>;
}

/// The playback core: scheduling, controls and per-frame rendering logic.
pub struct Player {
    scheduler: FrameScheduler,
    controls: ControlsState,
    buffered: BufferedLane,
    readout: TransportReadout,
    /// Display surface pixel size.
    surface_size: (u32, u32),
    /// Native media size, valid once metadata is ready.
    natural_size: (u32, u32),
}

impl Player {
    pub fn new(now: Instant) -> Self {
        Self {
            scheduler: FrameScheduler::new(),
            controls: ControlsState::new(now),
            buffered: BufferedLane::new(),
            readout: TransportReadout::new(),
            surface_size: (0, 0),
            natural_size: (0, 0),
        }
    }

    pub fn controls(&self) -> &ControlsState {
        &self.controls
    }

    pub fn buffered(&self) -> &BufferedLane {
        &self.buffered
    }

    pub fn readout(&self) -> &TransportReadout {
        &self.readout
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Display surface pixel size, kept in sync with the source media.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Host resized the drawable surface (window resize, fullscreen).
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
    }

    // ── Notifications from the host ────────────────────────────

    /// Media metadata became available: adopt the native size for the
    /// surface and format the total duration.
    pub fn on_metadata_ready<S: PlaybackSource + ?Sized>(&mut self, source: &S) {
        self.natural_size = source.natural_size();
        self.surface_size = self.natural_size;
        self.readout.set_duration(source.duration());
        debug!(
            width = self.natural_size.0,
            height = self.natural_size.1,
            "media metadata ready"
        );
    }

    /// Playback time advanced (also fires after a seek completes).
    pub fn on_time_update<S: PlaybackSource + ?Sized>(&mut self, source: &S) {
        let duration = source.duration();
        self.readout.set_position(source.current_time(), duration);
        self.buffered.update(&source.buffered(), duration);
    }

    /// A new LUT image finished loading: re-upload it immediately and, when
    /// paused, schedule one re-render so the new grade shows without
    /// resuming playback.
    pub fn set_lut<K, V, S>(&mut self, sink: &mut K, driver: &mut V, source: &S, lut: &HaldLut)
    where
        K: FrameSink + ?Sized,
        V: VsyncDriver + ?Sized,
        S: PlaybackSource + ?Sized,
    {
        debug!("LUT image replaced");
        sink.upload_lut(lut.image());
        if source.is_paused() {
            self.scheduler.request_frame(driver);
        }
    }

    // ── Input events ───────────────────────────────────────────

    /// Pointer-down/move or touch-start over the video surface.
    pub fn on_pointer_activity(&mut self, now: Instant) {
        self.controls.note_interaction(now);
    }

    /// Double-click: toggle fullscreen on the surface's container.
    pub fn on_double_click<H: FullscreenHost + ?Sized>(&mut self, host: &mut H) {
        self.controls.toggle_fullscreen(host);
    }

    /// Fullscreen-change confirmation from the host.
    pub fn on_fullscreen_change(&mut self, active: bool) {
        self.controls.on_fullscreen_change(active);
    }

    /// Click on the video surface: play/pause toggle. Playing kicks the
    /// render loop; it halts by itself on pause.
    pub fn toggle_playback<S, V>(&mut self, source: &mut S, driver: &mut V, now: Instant)
    where
        S: PlaybackSource + ?Sized,
        V: VsyncDriver + ?Sized,
    {
        if source.is_paused() {
            source.play();
            self.scheduler.request_frame(driver);
        } else {
            source.pause();
            self.controls.tick(now, true);
        }
    }

    /// Scrub-bar tap at `offset_px` within a bar `bar_width` wide.
    pub fn scrub<S, V>(
        &mut self,
        source: &mut S,
        driver: &mut V,
        offset_px: f32,
        bar_width: f32,
        now: Instant,
    ) -> Option<f64>
    where
        S: PlaybackSource + ?Sized,
        V: VsyncDriver + ?Sized,
    {
        self.controls.note_interaction(now);
        let target = controls::scrub(source, offset_px, bar_width)?;
        self.scheduler.request_frame(driver);
        Some(target)
    }

    // ── The render loop ────────────────────────────────────────

    /// Deliver the display's vsync callback: render once, then reschedule
    /// only while the source is playing.
    pub fn on_vsync<S, K, V>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        driver: &mut V,
        now: Instant,
    ) where
        S: PlaybackSource + ?Sized,
        K: FrameSink + ?Sized,
        V: VsyncDriver + ?Sized,
    {
        let mut scheduler = std::mem::take(&mut self.scheduler);
        scheduler.on_vsync(driver, |scheduler, driver| {
            self.render_frame(source, sink);
            if source.is_paused() {
                self.controls.tick(now, true);
            } else {
                scheduler.request_frame(driver);
                self.controls.tick(now, false);
            }
        });
        self.scheduler = scheduler;
    }

    fn render_frame<S, K>(&mut self, source: &S, sink: &mut K)
    where
        S: PlaybackSource + ?Sized,
        K: FrameSink + ?Sized,
    {
        let display = Rect::from_size(self.surface_size.0 as f32, self.surface_size.1 as f32);
        let viewport = fit_viewport(
            display,
            self.natural_size.0 as f32,
            self.natural_size.1 as f32,
        );

        if sink.upload_frame(source.current_frame()) == Upload::Skipped {
            trace!("no decoded pixels yet; drawing previous frame contents");
        }
        if let Err(e) = sink.draw(viewport) {
            warn!(error = %e, "frame draw failed");
        }
    }
}
