//! The external media source contract.
//!
//! Decode, demux and transport live in the host; the core only reads state
//! and calls transport operations. Notifications travel the other way: the
//! host invokes `Player::on_metadata_ready` / `Player::on_time_update` when
//! its media layer fires them.

use lutplay_core::ImageBuffer;

/// One buffered interval, `[start, end)` in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferedRange {
    pub start: f64,
    pub end: f64,
}

impl BufferedRange {
    /// Create a range; `end` is clamped to at least `start`.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length of the interval in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Playback transport and state exposed by the host's media subsystem.
///
/// The core never owns an implementation. `seek` is fire-and-forget: it
/// returns immediately and the new frame only becomes visible once the host
/// fires its time-update notification. Transport failures are not retried
/// here; they surface as the absence of expected state changes.
pub trait PlaybackSource {
    /// The most recent decoded frame. May have zero dimensions before the
    /// first frame decodes; uploads of such a frame are skipped.
    fn current_frame(&self) -> &ImageBuffer;

    /// Native media dimensions, valid once metadata is ready.
    fn natural_size(&self) -> (u32, u32);

    /// Total duration in seconds.
    fn duration(&self) -> f64;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Buffered intervals, ordered and non-overlapping.
    fn buffered(&self) -> Vec<BufferedRange>;

    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f64);
}
