//! GameController - composes universe, backend, animation and input
//!
//! Every draw re-fetches the universe's cells right before handing them to
//! the backend; nothing here keeps a cell view across a mutating call.

mod config;

pub use config::{GameConfig, DEFAULT_CELL_SIZE, DEFAULT_UNIVERSE_SIZE};

use crate::animation::{AnimationController, FpsMeter, FrameScheduler, Stopwatch};
use crate::core::{CellView, Result};
use crate::interaction::{InteractionMapper, Modifiers, Pattern, PointerSession, Stroke};
use crate::render::{RenderBackend, SurfaceLayout};
use crate::universe::Universe;

pub struct GameController<U, B, S> {
    universe: U,
    backend: B,
    animation: AnimationController<S>,
    fps: FpsMeter,
    mapper: InteractionMapper,
    pointer: PointerSession,
    drawn: bool,
    generation: u64,
    frame_ms: f64,
}

impl<U, B, S> GameController<U, B, S>
where
    U: Universe,
    B: RenderBackend,
    S: FrameScheduler,
{
    pub fn new(universe: U, backend: B, scheduler: S, cell_size: u32, now_ms: f64) -> Self {
        let layout = SurfaceLayout::new(cell_size, universe.width(), universe.height());
        Self {
            universe,
            backend,
            animation: AnimationController::new(scheduler),
            fps: FpsMeter::new(now_ms),
            mapper: InteractionMapper::new(layout),
            pointer: PointerSession::new(),
            drawn: false,
            generation: 0,
            frame_ms: 0.0,
        }
    }

    // === Animation ===

    pub fn start(&mut self) -> Result<()> {
        if self.animation.is_playing() {
            return Ok(());
        }
        if !self.drawn {
            self.draw()?;
        }
        self.animation.start()?;
        log::debug!("animation started ({} ticks/frame)", self.animation.ticks_per_frame());
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.animation.is_playing() {
            self.animation.stop();
            log::debug!("animation stopped at generation {}", self.generation);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.animation.is_playing()
    }

    pub fn set_ticks_per_frame(&mut self, ticks: i64) {
        self.animation.set_ticks_per_frame(ticks);
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.animation.ticks_per_frame()
    }

    /// Display-refresh callback body. A stale callback (stopped since it was
    /// requested) does nothing.
    pub fn on_frame(&mut self, now_ms: f64) -> Result<()> {
        let Some(ticks) = self.animation.begin_frame() else {
            return Ok(());
        };
        let watch = Stopwatch::start();
        self.fps.clock(now_ms);

        for _ in 0..ticks {
            self.universe.tick();
        }
        self.generation += ticks as u64;

        if let Err(e) = self.draw_cells() {
            self.animation.stop();
            return Err(e);
        }
        self.frame_ms = watch.elapsed_ms();

        self.animation.end_frame()
    }

    // === Drawing ===

    pub fn draw(&mut self) -> Result<()> {
        let cells = self.universe.cells();
        let view = CellView::new(&cells, self.universe.width(), self.universe.height());
        self.backend.draw(&view)?;
        self.drawn = true;
        Ok(())
    }

    /// Clear and redraw grid lines only, when the grid is enabled
    pub fn draw_grid(&mut self) {
        if !self.backend.draw_grid_flag() {
            return;
        }
        self.backend.clear();
        self.backend.draw_grid();
        self.drawn = true;
    }

    pub fn draw_cells(&mut self) -> Result<()> {
        let cells = self.universe.cells();
        let view = CellView::new(&cells, self.universe.width(), self.universe.height());
        self.backend.draw_cells(&view)
    }

    pub fn set_draw_grid_flag(&mut self, flag: bool) {
        self.backend.set_draw_grid_flag(flag);
    }

    pub fn draw_grid_flag(&self) -> bool {
        self.backend.draw_grid_flag()
    }

    /// Swap in a backend built on a fresh surface. The previous backend is
    /// dropped, releasing its resources, before the new one draws.
    pub fn replace_backend(&mut self, mut backend: B) -> Result<()> {
        backend.set_draw_grid_flag(self.backend.draw_grid_flag());
        drop(std::mem::replace(&mut self.backend, backend));
        self.drawn = false;
        self.draw()
    }

    // === Editing ===

    pub fn toggle_cell(&mut self, x: f64, y: f64) -> Result<()> {
        self.mapper.toggle(&mut self.universe, x, y);
        self.draw_cells()
    }

    /// Drag painting. Only redraws when a mutation was issued.
    pub fn set_cell_to_alive(&mut self, x: f64, y: f64) -> Result<()> {
        if self.mapper.paint_alive(&mut self.universe, x, y) {
            self.draw_cells()?;
        }
        Ok(())
    }

    pub fn insert_glider(&mut self, x: f64, y: f64) -> Result<()> {
        self.insert_pattern(x, y, &Pattern::glider())
    }

    pub fn insert_pulsar(&mut self, x: f64, y: f64) -> Result<()> {
        self.insert_pattern(x, y, &Pattern::pulsar())
    }

    pub fn insert_pattern(&mut self, x: f64, y: f64, pattern: &Pattern) -> Result<()> {
        self.mapper.stamp(&mut self.universe, x, y, pattern);
        self.draw_cells()
    }

    // === Pointer session ===

    pub fn pointer_down(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Result<()> {
        match self.pointer.press(modifiers) {
            Stroke::Toggle => self.toggle_cell(x, y),
            Stroke::Glider => self.insert_glider(x, y),
            Stroke::Pulsar => self.insert_pulsar(x, y),
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: Modifiers) -> Result<()> {
        if self.pointer.drag(modifiers) {
            self.set_cell_to_alive(x, y)?;
        }
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        self.pointer.release();
    }

    // === Accessors ===

    pub fn universe(&self) -> &U {
        &self.universe
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn scheduler(&self) -> &S {
        self.animation.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.animation.scheduler_mut()
    }

    pub fn layout(&self) -> &SurfaceLayout {
        self.mapper.layout()
    }

    pub fn fps(&self) -> &FpsMeter {
        &self.fps
    }

    /// Generations advanced by this controller
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> u32 {
        let cells = self.universe.cells();
        CellView::new(&cells, self.universe.width(), self.universe.height()).population()
    }

    /// Wall time spent ticking and drawing in the last frame
    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    pub fn is_pointer_held(&self) -> bool {
        self.pointer.is_held()
    }
}
