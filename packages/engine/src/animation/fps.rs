use std::collections::VecDeque;

/// Samples kept for the sliding window
pub const FPS_WINDOW: usize = 100;

/// Frame-rate estimate from consecutive frame timestamps
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frames: VecDeque<f64>,
    last_ms: f64,
    last_fps: u32,
}

impl FpsMeter {
    pub fn new(now_ms: f64) -> Self {
        Self {
            frames: VecDeque::with_capacity(FPS_WINDOW),
            last_ms: now_ms,
            last_fps: 0,
        }
    }

    /// Record a frame at `now_ms`, returning the rounded instantaneous rate.
    /// A timestamp that does not move forward is ignored.
    pub fn clock(&mut self, now_ms: f64) -> u32 {
        let delta = now_ms - self.last_ms;
        if delta <= 0.0 || !delta.is_finite() {
            return self.last_fps;
        }
        self.last_ms = now_ms;

        let fps = 1000.0 / delta;
        if self.frames.len() == FPS_WINDOW {
            self.frames.pop_front();
        }
        self.frames.push_back(fps);

        self.last_fps = fps.round() as u32;
        self.last_fps
    }

    pub fn last(&self) -> u32 {
        self.last_fps
    }

    pub fn mean(&self) -> f64 {
        if self.frames.is_empty() {
            return 0.0;
        }
        self.frames.iter().sum::<f64>() / self.frames.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.frames.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.frames.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    pub fn samples(&self) -> usize {
        self.frames.len()
    }
}
