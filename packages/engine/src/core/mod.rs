//! Core primitives shared by every layer
//!
//! - bitgrid: borrowed view over the packed cell buffer
//! - wrap:    toroidal coordinate reduction
//! - error:   engine error type surfaced to JS

mod bitgrid;
mod error;
mod wrap;

pub use bitgrid::{is_alive, packed_len, CellView};
pub use error::{ContextKind, EngineError, Result};
pub use wrap::{wrap, GridPos};
