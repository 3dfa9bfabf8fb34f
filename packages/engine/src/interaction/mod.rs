//! Pointer input to universe edits
//!
//! Screen positions map to cells by flooring over the cell pitch; every
//! resulting coordinate is wrapped onto the torus before it reaches the
//! universe.

mod patterns;
mod pointer;

pub use patterns::{CellWrite, Pattern, GLIDER};
pub use pointer::{Modifiers, PointerSession, Stroke};

use crate::core::GridPos;
use crate::render::SurfaceLayout;
use crate::universe::{Cell, Universe};

#[derive(Clone, Copy, Debug)]
pub struct InteractionMapper {
    layout: SurfaceLayout,
}

impl InteractionMapper {
    pub fn new(layout: SurfaceLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// `(floor(y / pitch), floor(x / pitch))`, not yet wrapped
    pub fn screen_to_grid(&self, x: f64, y: f64) -> (i64, i64) {
        self.layout.screen_to_grid(x, y)
    }

    pub fn locate(&self, x: f64, y: f64) -> GridPos {
        self.layout.locate(x, y)
    }

    pub fn toggle<U: Universe + ?Sized>(&self, universe: &mut U, x: f64, y: f64) -> GridPos {
        let pos = self.locate(x, y);
        universe.toggle_cell(pos.row, pos.col);
        pos
    }

    /// Set the cell under the pointer alive. Returns whether a mutation
    /// was issued: an already-alive cell is left alone when the universe
    /// can be read, otherwise the set is unconditional.
    pub fn paint_alive<U: Universe + ?Sized>(&self, universe: &mut U, x: f64, y: f64) -> bool {
        let pos = self.locate(x, y);
        if universe.get_cell(pos.row, pos.col) == Some(Cell::Alive) {
            return false;
        }
        universe.set_cell(pos.row, pos.col, Cell::Alive);
        true
    }

    /// Write every cell of `pattern` around the cell under the pointer
    pub fn stamp<U: Universe + ?Sized>(&self, universe: &mut U, x: f64, y: f64, pattern: &Pattern) -> GridPos {
        let anchor = self.locate(x, y);
        stamp_at(universe, anchor, pattern);
        anchor
    }
}

/// Apply `pattern` at a grid anchor, wrapping each write
pub fn stamp_at<U: Universe + ?Sized>(universe: &mut U, anchor: GridPos, pattern: &Pattern) {
    let (width, height) = (universe.width(), universe.height());
    for write in pattern.writes() {
        let pos = anchor.offset(write.dr, write.dc, width, height);
        universe.set_cell(pos.row, pos.col, write.cell);
    }
}
