//! Lifeview Engine - Game of Life view layer in WASM
//!
//! Architecture:
//! - core/         - Packed bit-grid decoding, toroidal wrap, errors
//! - universe/     - Universe contract and the JS-backed implementation
//! - render/       - Canvas2D and WebGL2 backends behind one trait
//! - interaction/  - Screen to cell mapping, patterns, drag session
//! - animation/    - Frame scheduling and FPS measurement
//! - game/         - Controller composing the above, plus config
//! - api/          - Public wasm-bindgen API

pub mod core;
pub mod universe;
pub mod render;
pub mod interaction;
pub mod animation;
pub mod game;
pub mod api;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and `log` routing to the console.
/// Safe to call more than once.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // Already initialised on repeat calls.
    console_log::init_with_level(log::Level::Info).ok();

    web_sys::console::log_1(&"Lifeview WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::GameOfLife;
pub use crate::core::{CellView, EngineError};
pub use game::{GameConfig, GameController};
pub use render::{Backend, RenderBackend, RenderMode};
pub use universe::{Cell, Universe};
