//! Vsync-paced frame scheduling.
//!
//! The display's vertical-sync callback paces rendering: at most one
//! callback is registered at a time, enforced here rather than by the host.
//! The recursive reschedule of the render loop becomes an explicit state
//! machine instead of nested callback closures.

use tracing::trace;

/// Host-provided vsync registration. One call registers exactly one future
/// callback; the host delivers it by invoking [`FrameScheduler::on_vsync`].
pub trait VsyncDriver {
    fn request_callback(&mut self);
}

/// Scheduler phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No render scheduled; the loop is halted until an explicit request.
    #[default]
    Idle,
    /// A vsync callback is registered; further requests coalesce.
    FrameRequested,
    /// Inside the render callback. The registration has been consumed, so
    /// one new request (the loop's reschedule) is accepted.
    Rendering,
}

/// Idempotent single-slot frame scheduler.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    state: SchedulerState,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Whether a vsync callback is currently registered.
    pub fn frame_pending(&self) -> bool {
        self.state == SchedulerState::FrameRequested
    }

    /// Request one render at the next vsync.
    ///
    /// Returns false without registering while a callback is already
    /// pending: duplicate requests never queue duplicate renders.
    pub fn request_frame<V: VsyncDriver + ?Sized>(&mut self, driver: &mut V) -> bool {
        match self.state {
            SchedulerState::FrameRequested => {
                trace!("frame request coalesced");
                false
            }
            SchedulerState::Idle | SchedulerState::Rendering => {
                self.state = SchedulerState::FrameRequested;
                driver.request_callback();
                true
            }
        }
    }

    /// Deliver the vsync callback.
    ///
    /// Consumes the pending registration before running `render`, so the
    /// render function may re-request the next frame (the playing loop), and
    /// a second request inside the same callback still coalesces. Spurious
    /// callbacks in any other state are ignored.
    pub fn on_vsync<V, F>(&mut self, driver: &mut V, render: F)
    where
        V: VsyncDriver + ?Sized,
        F: FnOnce(&mut Self, &mut V),
    {
        if self.state != SchedulerState::FrameRequested {
            trace!(state = ?self.state, "spurious vsync callback ignored");
            return;
        }
        self.state = SchedulerState::Rendering;
        render(self, driver);
        if self.state == SchedulerState::Rendering {
            self.state = SchedulerState::Idle;
        }
    }
}
