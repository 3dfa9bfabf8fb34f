//! Bit-packed grid decoding
//!
//! One bit per cell, row-major, 8 cells per byte. Bit index for (row, col)
//! is `row * width + col`, byte is `index / 8`, bit position `index % 8`
//! (LSB first). Trailing padding bits past `width * height` are never read.

/// Number of bytes needed to hold `width * height` cells
#[inline]
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

/// Decode a single cell straight from a packed buffer
#[inline(always)]
pub fn is_alive(buffer: &[u8], width: u32, height: u32, row: u32, col: u32) -> bool {
    debug_assert!(
        row < height && col < width,
        "is_alive: out of bounds ({}, {}) for {}x{} grid",
        row,
        col,
        width,
        height
    );
    let index = row as usize * width as usize + col as usize;
    (buffer[index >> 3] >> (index & 7)) & 1 != 0
}

/// Borrowed byte-range view over a universe's cell buffer.
///
/// The view borrows whatever produced it, so it cannot outlive the next
/// mutating call on the universe. Re-acquire it before every draw.
#[derive(Clone, Copy)]
pub struct CellView<'a> {
    bytes: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> CellView<'a> {
    pub fn new(bytes: &'a [u8], width: u32, height: u32) -> Self {
        debug_assert!(
            bytes.len() >= packed_len(width, height),
            "CellView: {} bytes cannot hold a {}x{} grid",
            bytes.len(),
            width,
            height
        );
        Self { bytes, width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline(always)]
    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        is_alive(self.bytes, self.width, self.height, row, col)
    }

    /// Lazily yields `(row, col)` of every cell whose state equals `alive`.
    pub fn cells_with_state(&self, alive: bool) -> impl Iterator<Item = (u32, u32)> + 'a {
        let view = *self;
        (0..view.height).flat_map(move |row| {
            (0..view.width).filter_map(move |col| (view.is_alive(row, col) == alive).then_some((row, col)))
        })
    }

    /// Alive cell count. Padding bits in the final byte are masked off.
    pub fn population(&self) -> u32 {
        let total = self.width as usize * self.height as usize;
        let full = total >> 3;
        let mut count: u32 = self.bytes[..full].iter().map(|b| b.count_ones()).sum();
        let rest = total & 7;
        if rest != 0 {
            let mask = (1u8 << rest) - 1;
            count += (self.bytes[full] & mask).count_ones();
        }
        count
    }
}
