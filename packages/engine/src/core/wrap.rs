/// Reduce `index` into `[0, max)` with toroidal wraparound.
#[inline]
pub fn wrap(index: i64, max: u32) -> u32 {
    debug_assert!(max > 0, "wrap: empty axis");
    index.rem_euclid(max as i64) as u32
}

/// A cell coordinate already reduced into the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: u32,
    pub col: u32,
}

impl GridPos {
    /// Wrap an unbounded `(row, col)` pair onto a `width x height` torus.
    pub fn wrapped(row: i64, col: i64, width: u32, height: u32) -> Self {
        Self {
            row: wrap(row, height),
            col: wrap(col, width),
        }
    }

    /// Neighbour at a signed offset, wrapped.
    pub fn offset(self, dr: i32, dc: i32, width: u32, height: u32) -> Self {
        Self::wrapped(self.row as i64 + dr as i64, self.col as i64 + dc as i64, width, height)
    }
}
