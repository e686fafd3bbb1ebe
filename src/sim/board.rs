/// Board: a dense 2D snapshot of cell state.
///
/// The tracer and composer read the board directly by row/column index,
/// never through a live query abstraction. Everything the beam engine
/// needs to know about the level is in this one array; the engine never
/// writes to it. Mutation (mirror placement, level load) belongs to the
/// game layer, and the beam session picks changes up on its next tick.

use crate::domain::cell::Cell;
use crate::domain::geom::Dir;

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
    pub rows: usize,
    pub cols: usize,
}

impl Board {
    pub fn new(cells: Vec<Vec<Cell>>) -> Self {
        let rows = cells.len();
        let cols = cells.first().map_or(0, |r| r.len());
        Board { cells, rows, cols }
    }

    pub fn empty() -> Self {
        Board { cells: vec![], rows: 0, cols: 0 }
    }

    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Cell at (row, col). Out of bounds reads as Empty — the tracer
    /// checks bounds itself and never relies on this fallback.
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        if row < self.rows && col < self.cols {
            self.cells[row][col]
        } else {
            Cell::Empty
        }
    }

    #[inline]
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.cols {
            self.cells[row][col] = cell;
        }
    }

    /// Locate the unique start cell and its firing direction.
    /// If a malformed level carries several, the first in row-major
    /// order wins.
    pub fn find_start(&self) -> Option<(usize, usize, Dir)> {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Cell::Start(dir) = cell {
                    return Some((r, c, *dir));
                }
            }
        }
        None
    }

    /// The other portal sharing `group`, if any. Portals are meant to come
    /// in pairs; with more than two members the first other one wins.
    pub fn portal_partner(&self, row: usize, col: usize, group: char) -> Option<(usize, usize)> {
        for (r, cells) in self.cells.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                if (r, c) != (row, col) {
                    if let Cell::Portal(g) = cell {
                        if *g == group {
                            return Some((r, c));
                        }
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::Cell;
    use crate::sim::level::parse_row;

    fn board_from(rows: &[&str]) -> Board {
        Board::new(rows.iter().map(|r| parse_row(r)).collect())
    }

    #[test]
    fn finds_start_and_direction() {
        let b = board_from(&[
            ". . .",
            ". S-R .",
            ". . .",
        ]);
        assert_eq!(b.find_start(), Some((1, 1, Dir::Right)));
    }

    #[test]
    fn no_start_is_none() {
        let b = board_from(&[". . .", ". # ."]);
        assert_eq!(b.find_start(), None);
    }

    #[test]
    fn portal_partner_found() {
        let b = board_from(&[
            "P-A . P-B",
            ". . .",
            "P-B . P-A",
        ]);
        assert_eq!(b.portal_partner(0, 0, 'A'), Some((2, 2)));
        assert_eq!(b.portal_partner(2, 2, 'A'), Some((0, 0)));
        assert_eq!(b.portal_partner(0, 2, 'B'), Some((2, 0)));
    }

    #[test]
    fn orphan_portal_has_no_partner() {
        let b = board_from(&["P-A . ."]);
        assert_eq!(b.portal_partner(0, 0, 'A'), None);
    }

    #[test]
    fn out_of_bounds_reads_empty() {
        let b = board_from(&["# #"]);
        assert_eq!(b.cell_at(5, 5), Cell::Empty);
        assert!(!b.in_bounds(-1, 0));
        assert!(!b.in_bounds(0, 2));
        assert!(b.in_bounds(0, 1));
    }
}
