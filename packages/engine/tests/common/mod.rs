//! Native test doubles for the universe, backend and frame scheduler.

#![allow(dead_code)]

use std::cell::{Cell as Counter, RefCell};
use std::rc::Rc;

use lifeview_engine::animation::{FrameHandle, FrameScheduler};
use lifeview_engine::core::{packed_len, CellView, EngineError, Result};
use lifeview_engine::render::RenderBackend;
use lifeview_engine::universe::{Cell, CellBytes, Universe};

/// In-memory packed universe with call counters.
///
/// `tick` always moves the buffer to a fresh allocation so stale views
/// would observe a different address.
pub struct PackedUniverse {
    width: u32,
    height: u32,
    bits: Vec<u8>,
    conway: bool,
    readable: bool,
    pub ticks: usize,
    pub sets: usize,
    pub toggles: usize,
    pub cell_reads: Counter<usize>,
}

impl PackedUniverse {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![0; packed_len(width, height)],
            conway: false,
            readable: true,
            ticks: 0,
            sets: 0,
            toggles: 0,
            cell_reads: Counter::new(0),
        }
    }

    /// Apply B3/S23 on tick instead of leaving cells untouched
    pub fn with_conway(mut self) -> Self {
        self.conway = true;
        self
    }

    /// Hide `get_cell`, like a simulation module without a read export
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    pub fn alive(&self, row: u32, col: u32) -> bool {
        let index = (row * self.width + col) as usize;
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }

    pub fn put(&mut self, row: u32, col: u32, alive: bool) {
        let index = (row * self.width + col) as usize;
        if alive {
            self.bits[index / 8] |= 1 << (index % 8);
        } else {
            self.bits[index / 8] &= !(1 << (index % 8));
        }
    }

    pub fn alive_cells(&self) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.alive(row, col) {
                    out.push((row, col));
                }
            }
        }
        out
    }

    fn live_neighbours(&self, row: u32, col: u32) -> u8 {
        let (w, h) = (self.width as i64, self.height as i64);
        let mut count = 0;
        for dr in [-1i64, 0, 1] {
            for dc in [-1i64, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = (row as i64 + dr).rem_euclid(h) as u32;
                let c = (col as i64 + dc).rem_euclid(w) as u32;
                count += self.alive(r, c) as u8;
            }
        }
        count
    }
}

impl Universe for PackedUniverse {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn tick(&mut self) {
        self.ticks += 1;
        let mut next = PackedUniverse::new(self.width, self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let alive = self.alive(row, col);
                let alive = if self.conway {
                    matches!((alive, self.live_neighbours(row, col)), (true, 2) | (_, 3))
                } else {
                    alive
                };
                next.put(row, col, alive);
            }
        }
        self.bits = next.bits;
    }

    fn cells(&self) -> CellBytes<'_> {
        self.cell_reads.set(self.cell_reads.get() + 1);
        CellBytes::Borrowed(&self.bits)
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        self.toggles += 1;
        let alive = self.alive(row, col);
        self.put(row, col, !alive);
    }

    fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        self.sets += 1;
        self.put(row, col, cell.is_alive());
    }

    fn get_cell(&self, row: u32, col: u32) -> Option<Cell> {
        self.readable.then(|| Cell::from_alive(self.alive(row, col)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Clear(u32),
    Grid(u32),
    Cells(u32, Vec<(u32, u32)>),
    Dropped(u32),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Backend that records what it was asked to do
pub struct RecordingBackend {
    pub id: u32,
    log: EventLog,
    grid: bool,
    pub fail_draws: bool,
}

impl RecordingBackend {
    pub fn new(id: u32, log: &EventLog) -> Self {
        Self {
            id,
            log: log.clone(),
            grid: true,
            fail_draws: false,
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self) {
        self.log.borrow_mut().push(Event::Clear(self.id));
    }

    fn draw_grid(&mut self) {
        self.log.borrow_mut().push(Event::Grid(self.id));
    }

    fn draw_cells(&mut self, cells: &CellView<'_>) -> Result<()> {
        if self.fail_draws {
            return Err(EngineError::Resource("test backend"));
        }
        let alive = cells.cells_with_state(true).collect();
        self.log.borrow_mut().push(Event::Cells(self.id, alive));
        Ok(())
    }

    fn set_draw_grid_flag(&mut self, flag: bool) {
        self.grid = flag;
    }

    fn draw_grid_flag(&self) -> bool {
        self.grid
    }
}

impl Drop for RecordingBackend {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Event::Dropped(self.id));
    }
}

/// Scheduler fired by hand from the test
#[derive(Default)]
pub struct ManualScheduler {
    next: i32,
    pub pending: Vec<FrameHandle>,
    pub requests: usize,
    pub cancels: usize,
}

impl ManualScheduler {
    /// Host delivers the oldest outstanding request
    pub fn fire(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.pending.remove(0);
        true
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle> {
        self.next += 1;
        self.requests += 1;
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancels += 1;
        self.pending.retain(|h| *h != handle);
    }
}
