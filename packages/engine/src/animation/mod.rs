//! Play/pause state machine over a display-refresh scheduler
//!
//! At most one frame request is outstanding per controller. `stop` only
//! suppresses the next schedule: a callback that already fired still runs
//! its ticks and draw, it just will not reschedule.

mod clock;
mod fps;

pub use clock::{now_ms, Stopwatch};
pub use fps::{FpsMeter, FPS_WINDOW};

use crate::core::Result;

/// Opaque id of a pending frame request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host hook for "call me on the next display refresh"
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Running,
}

pub struct AnimationController<S> {
    scheduler: S,
    state: PlayState,
    pending: Option<FrameHandle>,
    ticks_per_frame: u32,
}

impl<S: FrameScheduler> AnimationController<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: PlayState::Stopped,
            pending: None,
            ticks_per_frame: 1,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Running
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }

    /// Values below 1 clamp to 1.
    pub fn set_ticks_per_frame(&mut self, ticks: i64) {
        self.ticks_per_frame = ticks.clamp(1, u32::MAX as i64) as u32;
    }

    /// Schedule the first frame. No-op while running.
    pub fn start(&mut self) -> Result<()> {
        if self.is_playing() {
            return Ok(());
        }
        self.schedule()?;
        self.state = PlayState::Running;
        Ok(())
    }

    /// Cancel the pending frame. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = PlayState::Stopped;
    }

    /// Entry of a frame callback. Returns the number of ticks to run, or
    /// `None` when the callback is stale (stopped in the meantime).
    pub fn begin_frame(&mut self) -> Option<u32> {
        // The request that led here has been consumed.
        self.pending = None;
        self.is_playing().then_some(self.ticks_per_frame)
    }

    /// Exit of a frame callback: reschedule unless stopped meanwhile.
    pub fn end_frame(&mut self) -> Result<()> {
        if self.is_playing() && self.pending.is_none() {
            if let Err(e) = self.schedule() {
                self.state = PlayState::Stopped;
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn schedule(&mut self) -> Result<()> {
        debug_assert!(self.pending.is_none(), "frame already scheduled");
        self.pending = Some(self.scheduler.request_frame()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        next: i32,
        outstanding: Vec<FrameHandle>,
        requests: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) -> Result<FrameHandle> {
            self.next += 1;
            self.requests += 1;
            let handle = FrameHandle(self.next);
            self.outstanding.push(handle);
            Ok(handle)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.outstanding.retain(|h| *h != handle);
        }
    }

    impl CountingScheduler {
        /// Host fires the oldest request
        fn fire(&mut self) -> bool {
            if self.outstanding.is_empty() {
                return false;
            }
            self.outstanding.remove(0);
            true
        }
    }

    #[test]
    fn start_twice_keeps_one_request() {
        let mut anim = AnimationController::new(CountingScheduler::default());
        anim.start().unwrap();
        anim.start().unwrap();
        assert!(anim.is_playing());
        assert_eq!(anim.scheduler().outstanding.len(), 1);
        assert_eq!(anim.scheduler().requests, 1);
    }

    #[test]
    fn stop_when_stopped_is_noop() {
        let mut anim = AnimationController::new(CountingScheduler::default());
        anim.stop();
        assert!(!anim.is_playing());
        assert_eq!(anim.state(), PlayState::Stopped);
    }

    #[test]
    fn stop_cancels_pending_request() {
        let mut anim = AnimationController::new(CountingScheduler::default());
        anim.start().unwrap();
        anim.stop();
        assert!(!anim.is_playing());
        assert!(anim.scheduler().outstanding.is_empty());
    }

    #[test]
    fn frame_reschedules_while_running() {
        let mut anim = AnimationController::new(CountingScheduler::default());
        anim.set_ticks_per_frame(3);
        anim.start().unwrap();

        for _ in 0..5 {
            assert!(anim.scheduler_mut().fire());
            assert_eq!(anim.begin_frame(), Some(3));
            anim.end_frame().unwrap();
            assert_eq!(anim.scheduler().outstanding.len(), 1);
        }
        assert_eq!(anim.scheduler().requests, 6);
    }

    #[test]
    fn stop_inside_frame_suppresses_next_schedule() {
        let mut anim = AnimationController::new(CountingScheduler::default());
        anim.start().unwrap();
        anim.scheduler_mut().fire();

        assert_eq!(anim.begin_frame(), Some(1));
        anim.stop();
        anim.end_frame().unwrap();
        assert!(anim.scheduler().outstanding.is_empty());
        assert_eq!(anim.begin_frame(), None);
    }

    #[test]
    fn ticks_per_frame_clamps_to_one() {
        let mut anim = AnimationController::new(CountingScheduler::default());
        for bad in [0, -5, i64::MIN] {
            anim.set_ticks_per_frame(bad);
            assert_eq!(anim.ticks_per_frame(), 1);
        }
        anim.set_ticks_per_frame(7);
        assert_eq!(anim.ticks_per_frame(), 7);
    }
}
