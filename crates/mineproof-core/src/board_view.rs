use std::{fmt, ops::Index, str::FromStr};

use crate::{BoardSize, Coord};

/// The visible state of a single cell.
///
/// Mine identity is never exposed for cells that were not revealed; the only
/// way to see a mine is to step on it ([`CellView::Exploded`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellView {
    /// Not yet revealed and not flagged.
    #[default]
    Hidden,
    /// Marked as a mine by the player.
    Flagged,
    /// Revealed safe cell carrying its adjacent mine count (0-8).
    Revealed(u8),
    /// Revealed mine.
    Exploded,
}

impl CellView {
    /// Returns the adjacent mine count if the cell is a revealed safe cell.
    #[must_use]
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::Hidden => '_',
            Self::Flagged => 'F',
            Self::Exploded => '*',
            Self::Revealed(count @ 0..=8) => (b'0' + count) as char,
            Self::Revealed(_) => '?',
        }
    }

    const fn is_valid(self) -> bool {
        !matches!(self, Self::Revealed(9..))
    }
}

/// Read-only snapshot of the visible board.
///
/// # Text format
///
/// One board row per line; whitespace inside a line is ignored and blank lines
/// are skipped.
///
/// - `_` hidden
/// - `F` flagged
/// - `*` exploded mine
/// - `0`-`8` revealed cell with its adjacent mine count
///
/// # Examples
///
/// ```
/// use mineproof_core::{BoardView, CellView, Coord};
///
/// let view: BoardView = "
///     1 _ _
///     1 2 F
/// "
/// .parse()?;
/// assert_eq!(view.size().rows, 2);
/// assert_eq!(view[Coord::new(1, 1)], CellView::Revealed(2));
/// assert_eq!(view[Coord::new(1, 2)], CellView::Flagged);
/// # Ok::<(), mineproof_core::ParseBoardViewError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    size: BoardSize,
    cells: Vec<CellView>,
}

impl BoardView {
    /// Creates a view where every cell is hidden.
    #[must_use]
    pub fn hidden(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![CellView::Hidden; size.cell_count()],
        }
    }

    /// Creates a view from row-major cells.
    ///
    /// Returns `None` if the number of cells does not match `size`, or if a
    /// revealed cell claims more than eight adjacent mines.
    #[must_use]
    pub fn from_cells(size: BoardSize, cells: Vec<CellView>) -> Option<Self> {
        (cells.len() == size.cell_count() && cells.iter().all(|cell| cell.is_valid()))
            .then_some(Self { size, cells })
    }

    /// Creates a view by asking `f` for the state of every cell, row-major.
    ///
    /// Counts are not checked; a count above eight is shown as `?`.
    #[must_use]
    pub fn from_fn(size: BoardSize, f: impl FnMut(Coord) -> CellView) -> Self {
        Self {
            size,
            cells: size.coords().map(f).collect(),
        }
    }

    /// Returns the board dimensions.
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the cell at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<CellView> {
        self.size
            .contains(coord)
            .then(|| self.cells[self.size.index_of(coord)])
    }

    /// Iterates over `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellView)> + '_ {
        self.size.coords().zip(self.cells.iter().copied())
    }

    /// Returns the number of cells in the given state.
    #[must_use]
    pub fn count_where(&self, pred: impl Fn(&CellView) -> bool) -> usize {
        self.cells.iter().filter(|cell| pred(cell)).count()
    }
}

impl Index<Coord> for BoardView {
    type Output = CellView;

    fn index(&self, coord: Coord) -> &Self::Output {
        assert!(
            self.size.contains(coord),
            "{coord} is outside the {} board",
            self.size
        );
        &self.cells[self.size.index_of(coord)]
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(usize::from(self.size.cols).max(1)) {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors produced when parsing a [`BoardView`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardViewError {
    /// The input contained no rows.
    #[display("board has no rows")]
    Empty,
    /// A row had a different width than the first row.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character did not name any cell state.
    #[display("invalid cell character {ch:?} at {coord}")]
    InvalidCell {
        /// The character.
        ch: char,
        /// Where it was found.
        coord: Coord,
    },
    /// The board is too large to address with 16-bit coordinates.
    #[display("board dimensions exceed the supported size")]
    TooLarge,
}

impl FromStr for BoardView {
    type Err = ParseBoardViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut cols = None;
        let mut rows = 0usize;

        for line in s.lines() {
            let symbols: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if symbols.is_empty() {
                continue;
            }
            let expected = *cols.get_or_insert(symbols.len());
            if symbols.len() != expected {
                return Err(ParseBoardViewError::RaggedRow {
                    row: rows,
                    expected,
                    found: symbols.len(),
                });
            }
            for (col, ch) in symbols.into_iter().enumerate() {
                let cell = match ch {
                    '_' => CellView::Hidden,
                    'F' => CellView::Flagged,
                    '*' => CellView::Exploded,
                    '0'..='8' => CellView::Revealed(ch as u8 - b'0'),
                    _ => {
                        let coord = Coord::new(
                            u16::try_from(rows).map_err(|_| ParseBoardViewError::TooLarge)?,
                            u16::try_from(col).map_err(|_| ParseBoardViewError::TooLarge)?,
                        );
                        return Err(ParseBoardViewError::InvalidCell { ch, coord });
                    }
                };
                cells.push(cell);
            }
            rows += 1;
        }

        let cols = cols.ok_or(ParseBoardViewError::Empty)?;
        let size = BoardSize::new(
            u16::try_from(rows).map_err(|_| ParseBoardViewError::TooLarge)?,
            u16::try_from(cols).map_err(|_| ParseBoardViewError::TooLarge)?,
        );
        Ok(Self { size, cells })
    }
}
