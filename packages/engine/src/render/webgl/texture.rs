//! CPU side of the texture upload: packed bits to RGBA bytes.

use crate::core::CellView;

pub const BYTES_PER_TEXEL: usize = 4;

/// Expand every cell into one RGBA texel (255 alive / 0 dead in RGB, alpha
/// always opaque), row-major from the top row. `out` is reused across frames.
pub fn expand_rgba(cells: &CellView<'_>, out: &mut Vec<u8>) {
    let (width, height) = (cells.width(), cells.height());
    out.clear();
    out.reserve(width as usize * height as usize * BYTES_PER_TEXEL);

    for row in 0..height {
        for col in 0..width {
            let v = if cells.is_alive(row, col) { 255 } else { 0 };
            out.extend_from_slice(&[v, v, v, 255]);
        }
    }
}

/// Reverse row order in place. Texture row 0 is the bottom of the quad,
/// while the universe stores its top row first.
pub fn flip_rows(pixels: &mut [u8], width: u32, height: u32) {
    let stride = width as usize * BYTES_PER_TEXEL;
    let height = height as usize;
    debug_assert!(pixels.len() >= stride * height);

    for row in 0..height / 2 {
        let mirror = height - 1 - row;
        let (top, bottom) = pixels.split_at_mut(mirror * stride);
        top[row * stride..(row + 1) * stride].swap_with_slice(&mut bottom[..stride]);
    }
}
