//! Internal zero-based grid coordinates.

use std::fmt;

/// A cell on the 8x8 grid, addressed by (row, col) with both in `[0, 8)`.
///
/// Row 0 is chess rank 8 (the top of the board from White's point of view)
/// and column 0 is file 'a'. Human-facing coordinates are handled by
/// [`ChessCoordinate`](crate::ChessCoordinate); the engine works in grid
/// positions throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    row: u8,
    col: u8,
}

impl GridPos {
    /// Creates a grid position, returning `None` if either component is
    /// out of bounds.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(GridPos { row, col })
        } else {
            None
        }
    }

    /// Returns the row (0-7, top to bottom).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7, file 'a' to file 'h').
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Steps by the given deltas, returning `None` when the result would
    /// leave the board. This is the workhorse for ray walking and fixed
    /// offset tables in move generation.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(GridPos {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bounds() {
        assert!(GridPos::new(0, 0).is_some());
        assert!(GridPos::new(7, 7).is_some());
        assert!(GridPos::new(8, 0).is_none());
        assert!(GridPos::new(0, 8).is_none());
    }

    #[test]
    fn offset_on_board() {
        let pos = GridPos::new(4, 4).unwrap();
        let up = pos.offset(-1, 0).unwrap();
        assert_eq!((up.row(), up.col()), (3, 4));
        let diag = pos.offset(2, -3).unwrap();
        assert_eq!((diag.row(), diag.col()), (6, 1));
    }

    #[test]
    fn offset_off_board() {
        let corner = GridPos::new(0, 0).unwrap();
        assert!(corner.offset(-1, 0).is_none());
        assert!(corner.offset(0, -1).is_none());
        let other = GridPos::new(7, 7).unwrap();
        assert!(other.offset(1, 0).is_none());
        assert!(other.offset(0, 1).is_none());
    }
}
