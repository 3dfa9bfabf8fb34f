//! Universe - the external simulation collaborator
//!
//! The automaton rule and the cell storage live outside this crate. The
//! render layer only needs dimensions, a way to advance, a packed view of
//! the cells and single-cell mutators.

use std::cell::{Ref, RefCell};
use std::ops::Deref;

mod js;

pub use js::JsUniverse;

/// Cell state as the simulation module encodes it
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn from_alive(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Cell::from_alive(value != 0)
    }
}

/// Packed cell bytes handed out by [`Universe::cells`]
pub enum CellBytes<'a> {
    /// Straight out of the universe's own storage
    Borrowed(&'a [u8]),
    /// Copied into a scratch buffer the universe keeps between calls
    Scratch(Ref<'a, [u8]>),
    Owned(Vec<u8>),
}

impl<'a> CellBytes<'a> {
    /// Refill `scratch` with `len` bytes through `fill` and hand it out.
    /// Falls back to a fresh allocation while an earlier view still holds
    /// the scratch buffer.
    pub fn from_scratch(scratch: &'a RefCell<Vec<u8>>, len: usize, fill: impl FnOnce(&mut [u8])) -> Self {
        let Ok(mut buf) = scratch.try_borrow_mut() else {
            let mut owned = vec![0; len];
            fill(&mut owned);
            return CellBytes::Owned(owned);
        };
        buf.resize(len, 0);
        fill(&mut buf);
        drop(buf);
        CellBytes::Scratch(Ref::map(scratch.borrow(), |v| v.as_slice()))
    }
}

impl Deref for CellBytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            CellBytes::Borrowed(bytes) => *bytes,
            CellBytes::Scratch(bytes) => &bytes[..],
            CellBytes::Owned(bytes) => &bytes[..],
        }
    }
}

pub trait Universe {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Advance one generation. May relocate the cell buffer.
    fn tick(&mut self);

    /// Packed row-major cells, `packed_len(width, height)` bytes at least.
    ///
    /// The returned bytes borrow `self`, so they are gone before the next
    /// `tick`/`set_cell`/`toggle_cell` can run.
    fn cells(&self) -> CellBytes<'_>;

    fn toggle_cell(&mut self, row: u32, col: u32);

    fn set_cell(&mut self, row: u32, col: u32, cell: Cell);

    /// Read a single cell. `None` means the simulation exposes no read
    /// capability, not that the cell is dead.
    fn get_cell(&self, _row: u32, _col: u32) -> Option<Cell> {
        None
    }
}
