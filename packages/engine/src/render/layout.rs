//! Pixel geometry of the drawing surface
//!
//! Every cell is `cell_size x cell_size` pixels with a 1px gutter in front
//! of it, so one period along either axis is `cell_size + 1` pixels and the
//! surface carries one extra pixel for the closing grid line.

use crate::core::GridPos;

/// One straight grid-line segment in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceLayout {
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
}

impl SurfaceLayout {
    pub fn new(cell_size: u32, width: u32, height: u32) -> Self {
        Self { cell_size: cell_size.max(1), width, height }
    }

    /// Pixels per cell including the gutter
    #[inline]
    pub fn pitch(&self) -> u32 {
        self.cell_size + 1
    }

    pub fn canvas_width(&self) -> u32 {
        self.pitch() * self.width + 1
    }

    pub fn canvas_height(&self) -> u32 {
        self.pitch() * self.height + 1
    }

    /// Top-left pixel of the cell's filled area
    #[inline]
    pub fn cell_origin(&self, row: u32, col: u32) -> (f64, f64) {
        (
            (col * self.pitch() + 1) as f64,
            (row * self.pitch() + 1) as f64,
        )
    }

    /// `width + 1` vertical then `height + 1` horizontal segments, each one
    /// centred on the gutter pixel column/row so a 1px stroke stays crisp.
    pub fn grid_lines(&self) -> impl Iterator<Item = Segment> {
        let pitch = self.pitch() as f64;
        let right = self.canvas_width() as f64;
        let bottom = self.canvas_height() as f64;

        let vertical = (0..=self.width).map(move |i| {
            let x = i as f64 * pitch + 0.5;
            Segment { from: (x, 0.0), to: (x, bottom) }
        });
        let horizontal = (0..=self.height).map(move |j| {
            let y = j as f64 * pitch + 0.5;
            Segment { from: (0.0, y), to: (right, y) }
        });
        vertical.chain(horizontal)
    }

    /// Unbounded `(row, col)` under a surface-relative pointer position
    #[inline]
    pub fn screen_to_grid(&self, x: f64, y: f64) -> (i64, i64) {
        let pitch = self.pitch() as f64;
        ((y / pitch).floor() as i64, (x / pitch).floor() as i64)
    }

    /// Pointer position mapped onto the torus
    pub fn locate(&self, x: f64, y: f64) -> GridPos {
        let (row, col) = self.screen_to_grid(x, y);
        GridPos::wrapped(row, col, self.width, self.height)
    }
}
