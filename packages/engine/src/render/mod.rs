//! Render backends
//!
//! Two pipelines sit behind one contract:
//! - canvas2d: immediate rasterization, one filled rect per cell
//! - webgl:    packed grid expanded into a texture, grid lines in the shader
//!
//! A canvas hands out only one kind of context for its whole life, so a
//! backend is built once per surface and discarded on switch.

use std::fmt;
use std::str::FromStr;

use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::core::{CellView, ContextKind, EngineError, Result};

mod canvas2d;
mod layout;
mod palette;
pub mod webgl;

pub use canvas2d::Canvas2dBackend;
pub use layout::{Segment, SurfaceLayout};
pub use palette::{parse_hex, Palette};
pub use webgl::WebGlBackend;

/// Capability contract shared by every backend
pub trait RenderBackend {
    fn clear(&mut self);

    fn draw_grid(&mut self);

    fn draw_cells(&mut self, cells: &CellView<'_>) -> Result<()>;

    fn set_draw_grid_flag(&mut self, flag: bool);

    fn draw_grid_flag(&self) -> bool;

    /// Full frame: clear, grid (when enabled), cells
    fn draw(&mut self, cells: &CellView<'_>) -> Result<()> {
        self.clear();
        if self.draw_grid_flag() {
            self.draw_grid();
        }
        self.draw_cells(cells)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Canvas2d,
    WebGl,
}

impl RenderMode {
    pub const ALL: [RenderMode; 2] = [RenderMode::Canvas2d, RenderMode::WebGl];

    pub fn id(self) -> &'static str {
        match self {
            RenderMode::Canvas2d => "2D",
            RenderMode::WebGl => "WebGL",
        }
    }

    pub fn context_kind(self) -> ContextKind {
        match self {
            RenderMode::Canvas2d => ContextKind::Canvas2d,
            RenderMode::WebGl => ContextKind::WebGl2,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RenderMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        RenderMode::ALL
            .into_iter()
            .find(|mode| mode.id() == s)
            .ok_or_else(|| EngineError::UnsupportedRenderMode(s.to_string()))
    }
}

/// The closed set of backends a controller can drive
pub enum Backend {
    Canvas2d(Canvas2dBackend),
    WebGl(WebGlBackend),
}

impl Backend {
    /// Size `canvas` for `layout` and build the requested backend on it.
    pub fn acquire(
        canvas: &HtmlCanvasElement,
        mode: RenderMode,
        layout: SurfaceLayout,
        palette: &Palette,
        show_grid: bool,
    ) -> Result<Self> {
        canvas.set_width(layout.canvas_width());
        canvas.set_height(layout.canvas_height());

        let backend = match mode {
            RenderMode::Canvas2d => Backend::Canvas2d(Canvas2dBackend::new(canvas, layout, palette, show_grid)?),
            RenderMode::WebGl => Backend::WebGl(WebGlBackend::new(canvas, layout, palette, show_grid)?),
        };
        log::info!(
            "{} backend ready on {}x{} px surface ({} context)",
            mode,
            layout.canvas_width(),
            layout.canvas_height(),
            mode.context_kind()
        );
        Ok(backend)
    }

    pub fn mode(&self) -> RenderMode {
        match self {
            Backend::Canvas2d(_) => RenderMode::Canvas2d,
            Backend::WebGl(_) => RenderMode::WebGl,
        }
    }
}

impl RenderBackend for Backend {
    fn clear(&mut self) {
        match self {
            Backend::Canvas2d(b) => b.clear(),
            Backend::WebGl(b) => b.clear(),
        }
    }

    fn draw_grid(&mut self) {
        match self {
            Backend::Canvas2d(b) => b.draw_grid(),
            Backend::WebGl(b) => b.draw_grid(),
        }
    }

    fn draw_cells(&mut self, cells: &CellView<'_>) -> Result<()> {
        match self {
            Backend::Canvas2d(b) => b.draw_cells(cells),
            Backend::WebGl(b) => b.draw_cells(cells),
        }
    }

    fn set_draw_grid_flag(&mut self, flag: bool) {
        match self {
            Backend::Canvas2d(b) => b.set_draw_grid_flag(flag),
            Backend::WebGl(b) => b.set_draw_grid_flag(flag),
        }
    }

    fn draw_grid_flag(&self) -> bool {
        match self {
            Backend::Canvas2d(b) => b.draw_grid_flag(),
            Backend::WebGl(b) => b.draw_grid_flag(),
        }
    }
}

/// `canvas.getContext(id)` cast to `T`, with a null context reported as
/// unavailable (also what a canvas already bound to another kind returns).
pub(crate) fn acquire_context<T: JsCast>(canvas: &HtmlCanvasElement, kind: ContextKind) -> Result<T> {
    canvas
        .get_context(&kind.to_string())
        .map_err(EngineError::from_js)?
        .ok_or(EngineError::ContextUnavailable(kind))?
        .dyn_into::<T>()
        .map_err(|_| EngineError::ContextUnavailable(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mode_round_trips_identifiers() {
        assert_eq!("2D".parse::<RenderMode>().unwrap(), RenderMode::Canvas2d);
        assert_eq!("WebGL".parse::<RenderMode>().unwrap(), RenderMode::WebGl);
        assert_eq!(RenderMode::WebGl.to_string(), "WebGL");
    }

    #[test]
    fn unknown_render_mode_is_rejected() {
        let err = "webgpu".parse::<RenderMode>().unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedRenderMode(ref m) if m == "webgpu"));
        assert_eq!(err.to_string(), "unsupported render mode: webgpu");
    }

    #[test]
    fn context_kinds_match_modes() {
        assert_eq!(RenderMode::Canvas2d.context_kind().to_string(), "2d");
        assert_eq!(RenderMode::WebGl.context_kind().to_string(), "webgl2");
    }
}
