//! JS-facing surface

mod pointer;
mod scheduler;
pub mod wasm;

pub use scheduler::RafScheduler;
pub use wasm::GameOfLife;
