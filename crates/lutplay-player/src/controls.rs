//! On-screen playback controls: auto-hide, fullscreen, scrubbing, the
//! buffered-range lane and the transport readout.
//!
//! Pure state machines. The host owns the actual widgets/overlays and reads
//! the state here after forwarding its input events into the core.

use crate::source::{BufferedRange, PlaybackSource};
use lutplay_core::{format_clock, include_hours_for};
use std::time::{Duration, Instant};
use tracing::debug;

/// Controls hide after this much inactivity while playing.
pub const AUTO_HIDE_AFTER: Duration = Duration::from_millis(2500);

/// Host-side fullscreen transitions. The actual state change is confirmed
/// asynchronously through [`ControlsState::on_fullscreen_change`], never
/// assumed synchronously.
pub trait FullscreenHost {
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
}

/// Visibility and fullscreen state of the on-screen controls.
#[derive(Debug)]
pub struct ControlsState {
    controls_visible: bool,
    is_fullscreen: bool,
    last_interaction: Instant,
}

impl ControlsState {
    pub fn new(now: Instant) -> Self {
        Self {
            controls_visible: true,
            is_fullscreen: false,
            last_interaction: now,
        }
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Any pointer/touch interaction: reveal controls and reset the timer.
    pub fn note_interaction(&mut self, now: Instant) {
        self.last_interaction = now;
        self.controls_visible = true;
    }

    /// Per-frame auto-hide decision. Paused playback always shows controls;
    /// while playing they hide once the inactivity threshold passes.
    pub fn tick(&mut self, now: Instant, paused: bool) {
        if paused {
            self.controls_visible = true;
        } else if now.duration_since(self.last_interaction) > AUTO_HIDE_AFTER {
            self.controls_visible = false;
        }
    }

    /// Ask the host to enter or leave fullscreen based on the confirmed
    /// flag. The flag itself only changes in [`Self::on_fullscreen_change`].
    pub fn toggle_fullscreen<H: FullscreenHost + ?Sized>(&mut self, host: &mut H) {
        if self.is_fullscreen {
            host.exit_fullscreen();
        } else {
            host.request_fullscreen();
        }
    }

    /// Fullscreen-change notification from the host.
    pub fn on_fullscreen_change(&mut self, active: bool) {
        self.is_fullscreen = active;
    }
}

/// Map a pointer offset on the scrub bar to a target time.
///
/// Returns `None` for a degenerate bar or duration, so no division by zero
/// reaches the transport.
pub fn scrub_target(offset_px: f32, bar_width: f32, duration: f64) -> Option<f64> {
    if !(bar_width > 0.0) || !duration.is_finite() || duration <= 0.0 {
        return None;
    }
    let fraction = (offset_px / bar_width).clamp(0.0, 1.0) as f64;
    Some(fraction * duration)
}

/// Scrub-bar tap: pause, seek to the tapped time, resume. Returns the seek
/// target, or `None` when the tap could not be mapped.
pub fn scrub<S: PlaybackSource + ?Sized>(
    source: &mut S,
    offset_px: f32,
    bar_width: f32,
) -> Option<f64> {
    let target = scrub_target(offset_px, bar_width, source.duration())?;
    debug!(target, "scrub seek");
    source.pause();
    source.seek(target);
    source.play();
    Some(target)
}

/// One visual segment of the buffered lane, as percentages of duration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BufferedSegment {
    pub left_pct: f64,
    pub width_pct: f64,
}

/// The buffered-range visualization.
///
/// One segment per reported interval. Segments are only ever added as the
/// interval count grows; if the source ever reports fewer ranges, the
/// trailing segments collapse to zero width rather than being removed.
#[derive(Debug, Default)]
pub struct BufferedLane {
    segments: Vec<BufferedSegment>,
}

impl BufferedLane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[BufferedSegment] {
        &self.segments
    }

    /// Reconcile segments with the currently reported intervals.
    pub fn update(&mut self, ranges: &[BufferedRange], duration: f64) {
        if ranges.len() > self.segments.len() {
            self.segments
                .resize(ranges.len(), BufferedSegment::default());
        }

        for (i, segment) in self.segments.iter_mut().enumerate() {
            match ranges.get(i) {
                Some(range) if duration > 0.0 => {
                    segment.left_pct = 100.0 * range.start / duration;
                    segment.width_pct = 100.0 * range.duration() / duration;
                }
                _ => {
                    segment.width_pct = 0.0;
                }
            }
        }
    }
}

/// Elapsed/total strings and playhead progress for the transport display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportReadout {
    pub elapsed: String,
    pub total: String,
    pub progress_pct: f64,
}

impl TransportReadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration became known (metadata ready).
    pub fn set_duration(&mut self, duration: f64) {
        self.total = format_clock(duration, include_hours_for(duration));
    }

    /// Playback time advanced. The hour digit follows the total duration,
    /// so elapsed and total stay in the same format.
    pub fn set_position(&mut self, time: f64, duration: f64) {
        self.elapsed = format_clock(time, include_hours_for(duration));
        self.progress_pct = if duration > 0.0 {
            (100.0 * time / duration).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}
