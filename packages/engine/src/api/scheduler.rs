use std::cell::OnceCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::animation::{FrameHandle, FrameScheduler};
use crate::core::{EngineError, Result};

/// Shared slot for the frame closure. The closure needs a handle to the
/// controller that owns this scheduler, so it is installed after both exist.
pub type FrameCallback = Rc<OnceCell<Closure<dyn FnMut(f64)>>>;

/// `requestAnimationFrame`-driven scheduler
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window) -> (Self, FrameCallback) {
        let callback: FrameCallback = Rc::new(OnceCell::new());
        (Self { window, callback: callback.clone() }, callback)
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        let callback = self
            .callback
            .get()
            .ok_or(EngineError::Resource("frame callback"))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(EngineError::from_js)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }
}
