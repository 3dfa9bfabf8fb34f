//! Stamp templates
//!
//! A pattern is an ordered list of explicit writes relative to an anchor.
//! Order matters: a later write to the same cell wins.

use crate::universe::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellWrite {
    pub dr: i32,
    pub dc: i32,
    pub cell: Cell,
}

const fn write(dr: i32, dc: i32, alive: bool) -> CellWrite {
    CellWrite {
        dr,
        dc,
        cell: if alive { Cell::Alive } else { Cell::Dead },
    }
}

/// Canonical south-east glider around its centre cell
#[rustfmt::skip]
pub const GLIDER: [CellWrite; 9] = [
    write(-1, -1, false), write(-1, 0, true), write(-1, 1, false),
    write(0, -1, false),  write(0, 0, false), write(0, 1, true),
    write(1, -1, true),   write(1, 0, true),  write(1, 1, true),
];

/// Upper quadrant pair of the pulsar (rows -6..=-1, cols -6..=6)
const PULSAR_HALF: [[u8; 13]; 6] = [
    [0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
];

const PULSAR_REACH: i32 = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    writes: Vec<CellWrite>,
}

impl Pattern {
    pub fn new(writes: Vec<CellWrite>) -> Self {
        Self { writes }
    }

    pub fn glider() -> Self {
        Self::new(GLIDER.to_vec())
    }

    /// Period-3 pulsar centred on the anchor.
    ///
    /// Write order: clear the centre, upper half (rows -6..=-1), clear the
    /// 13-cell centre row, then the row-reversed half below (rows 1..=6).
    /// The centre-row clear only happens once, after the upper half.
    pub fn pulsar() -> Self {
        let mut writes = Vec::with_capacity(1 + 2 * 6 * 13 + 13);
        writes.push(write(0, 0, false));

        for pass in 0..2 {
            let rows: Vec<&[u8; 13]> = if pass == 0 {
                PULSAR_HALF.iter().collect()
            } else {
                PULSAR_HALF.iter().rev().collect()
            };
            let row_offset = pass * 7;

            for (row_idx, template) in rows.into_iter().enumerate() {
                let dr = row_idx as i32 - PULSAR_REACH + row_offset;
                for (col_idx, &alive) in template.iter().enumerate() {
                    writes.push(write(dr, col_idx as i32 - PULSAR_REACH, alive == 1));
                }
            }

            if pass == 0 {
                for col_idx in 0..13 {
                    writes.push(write(0, col_idx - PULSAR_REACH, false));
                }
            }
        }

        Self::new(writes)
    }

    pub fn writes(&self) -> &[CellWrite] {
        &self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Final state per offset after applying every write in order
    fn resolved(pattern: &Pattern) -> Vec<CellWrite> {
        let mut out: Vec<CellWrite> = Vec::new();
        for w in pattern.writes() {
            match out.iter_mut().find(|o| o.dr == w.dr && o.dc == w.dc) {
                Some(existing) => existing.cell = w.cell,
                None => out.push(*w),
            }
        }
        out
    }

    fn alive_offsets(pattern: &Pattern) -> Vec<(i32, i32)> {
        let mut cells: Vec<_> = resolved(pattern)
            .into_iter()
            .filter(|w| w.cell.is_alive())
            .map(|w| (w.dr, w.dc))
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn glider_has_five_alive_four_dead() {
        let glider = Pattern::glider();
        assert_eq!(glider.writes().len(), 9);
        assert_eq!(alive_offsets(&glider), vec![(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)]);
    }

    #[test]
    fn pulsar_matches_reference_shape() {
        let pulsar = Pattern::pulsar();
        let alive = alive_offsets(&pulsar);
        assert_eq!(alive.len(), 48);

        // Four-fold symmetric around the anchor.
        for &(dr, dc) in &alive {
            assert!(alive.contains(&(-dr, dc)), "missing mirror of ({dr}, {dc})");
            assert!(alive.contains(&(dr, -dc)), "missing mirror of ({dr}, {dc})");
        }

        // The centre row and column are empty.
        assert!(alive.iter().all(|&(dr, dc)| dr != 0 && dc != 0));
        // Spot checks against the classic drawing.
        assert!(alive.contains(&(-6, -4)));
        assert!(alive.contains(&(-1, 4)));
        assert!(alive.contains(&(2, -1)));
        assert!(!alive.contains(&(1, -1)));
        assert!(alive.contains(&(4, 6)));
        assert!(!alive.contains(&(-5, -4)));
    }

    #[test]
    fn pulsar_clears_centre_row_only_after_first_half() {
        let writes = Pattern::pulsar().writes().to_vec();
        assert_eq!(writes[0], write(0, 0, false));

        let centre_row: Vec<usize> = writes
            .iter()
            .enumerate()
            .filter(|(_, w)| w.dr == 0)
            .map(|(i, _)| i)
            .collect();
        // Centre cell plus one 13-cell clear between the halves.
        assert_eq!(centre_row.len(), 14);
        assert_eq!(centre_row[1], 1 + 6 * 13);
        assert_eq!(writes.len(), 1 + 6 * 13 + 13 + 6 * 13);
    }

    #[test]
    fn pulsar_stays_inside_thirteen_square() {
        assert!(Pattern::pulsar()
            .writes()
            .iter()
            .all(|w| w.dr.abs() <= 6 && w.dc.abs() <= 6));
    }
}
