//! Millisecond timestamps on the display-refresh timeline.
//!
//! In the browser this is `performance.now()`, the same clock that stamps
//! `requestAnimationFrame` callbacks. Natively a monotonic `Instant`.

#[cfg(not(target_arch = "wasm32"))]
use std::sync::OnceLock;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Elapsed-time probe
#[derive(Clone, Copy)]
pub struct Stopwatch {
    start_ms: f64,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch { start_ms: now_ms() }
    }

    pub fn elapsed_ms(&self) -> f64 {
        now_ms() - self.start_ms
    }
}
