//! Immediate-mode rasterizer over `CanvasRenderingContext2d`
//!
//! Cells are painted in two passes (all alive, then all dead) so the fill
//! style changes twice per frame instead of once per cell.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{acquire_context, Palette, RenderBackend, SurfaceLayout};
use crate::core::{CellView, ContextKind, Result};

pub struct Canvas2dBackend {
    ctx: CanvasRenderingContext2d,
    layout: SurfaceLayout,
    palette: Palette,
    draw_grid_flag: bool,
}

impl Canvas2dBackend {
    pub fn new(canvas: &HtmlCanvasElement, layout: SurfaceLayout, palette: &Palette, show_grid: bool) -> Result<Self> {
        let ctx: CanvasRenderingContext2d = acquire_context(canvas, ContextKind::Canvas2d)?;
        ctx.set_line_width(1.0);
        Ok(Self {
            ctx,
            layout,
            palette: palette.clone(),
            draw_grid_flag: show_grid,
        })
    }

    fn fill_cells(&self, cells: &CellView<'_>, alive: bool) {
        let size = self.layout.cell_size as f64;
        for (row, col) in cells.cells_with_state(alive) {
            let (x, y) = self.layout.cell_origin(row, col);
            self.ctx.fill_rect(x, y, size, size);
        }
    }
}

impl RenderBackend for Canvas2dBackend {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.layout.canvas_width() as f64,
            self.layout.canvas_height() as f64,
        );
    }

    fn draw_grid(&mut self) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&self.palette.grid);
        for segment in self.layout.grid_lines() {
            self.ctx.move_to(segment.from.0, segment.from.1);
            self.ctx.line_to(segment.to.0, segment.to.1);
        }
        self.ctx.stroke();
    }

    fn draw_cells(&mut self, cells: &CellView<'_>) -> Result<()> {
        self.ctx.set_fill_style_str(&self.palette.alive);
        self.fill_cells(cells, true);

        self.ctx.set_fill_style_str(&self.palette.dead);
        self.fill_cells(cells, false);
        Ok(())
    }

    fn set_draw_grid_flag(&mut self, flag: bool) {
        self.draw_grid_flag = flag;
    }

    fn draw_grid_flag(&self) -> bool {
        self.draw_grid_flag
    }
}
