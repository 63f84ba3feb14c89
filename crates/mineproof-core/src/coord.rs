use std::iter::FusedIterator;

use tinyvec::ArrayVec;

/// A cell coordinate on a rectangular board, `(row, col)`, 0-indexed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index, counted from the top.
    pub row: u16,
    /// Column index, counted from the left.
    pub col: u16,
}

impl Coord {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

impl From<(u16, u16)> for Coord {
    fn from((row, col): (u16, u16)) -> Self {
        Self::new(row, col)
    }
}

/// The in-bounds neighbours of a cell. Never more than eight.
pub type Neighbors = ArrayVec<[Coord; 8]>;

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Dimensions of a rectangular board.
///
/// Every coordinate-aware operation in the workspace is bounded by a
/// `BoardSize`; adjacency is always the 8-neighbourhood.
///
/// # Examples
///
/// ```
/// use mineproof_core::{BoardSize, Coord};
///
/// let size = BoardSize::new(3, 3);
/// assert_eq!(size.neighbors(Coord::new(1, 1)).len(), 8);
/// assert_eq!(size.neighbors(Coord::new(0, 0)).len(), 3);
/// assert!(!size.contains(Coord::new(3, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{rows}x{cols}")]
pub struct BoardSize {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
}

impl BoardSize {
    /// Creates a new board size.
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Returns the total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Returns `true` if the coordinate lies on the board.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Returns the row-major index of an in-bounds coordinate.
    #[must_use]
    pub const fn index_of(&self, coord: Coord) -> usize {
        coord.row as usize * self.cols as usize + coord.col as usize
    }

    /// Iterates over every coordinate in row-major order.
    #[must_use]
    pub fn coords(&self) -> Coords {
        Coords {
            size: *self,
            next: 0,
        }
    }

    /// Returns the up-to-8 in-bounds cells adjacent to `coord`.
    ///
    /// The cell itself is never included.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Neighbors {
        let mut neighbors = Neighbors::new();
        for (d_row, d_col) in DISPLACEMENTS {
            let Some(row) = coord.row.checked_add_signed(d_row) else {
                continue;
            };
            let Some(col) = coord.col.checked_add_signed(d_col) else {
                continue;
            };
            let neighbor = Coord::new(row, col);
            if self.contains(neighbor) {
                neighbors.push(neighbor);
            }
        }
        neighbors
    }
}

/// Row-major iterator over the coordinates of a board.
#[derive(Debug, Clone)]
pub struct Coords {
    size: BoardSize,
    next: usize,
}

impl Iterator for Coords {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.size.cell_count() {
            return None;
        }
        let cols = usize::from(self.size.cols);
        #[expect(clippy::cast_possible_truncation)]
        let coord = Coord::new((self.next / cols) as u16, (self.next % cols) as u16);
        self.next += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size.cell_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Coords {}
impl FusedIterator for Coords {}
