use mineproof_core::{BoardSize, Coord};

/// Errors raised by the game simulator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The configuration asks for more mines than the board can hold.
    #[display("{mines} mines do not fit on a {size} board (at most {max})")]
    TooManyMines {
        /// Requested mine count.
        mines: usize,
        /// Largest allowed mine count.
        max: usize,
        /// Board dimensions.
        size: BoardSize,
    },
    /// The board has no cells.
    #[display("a board needs at least one row and one column")]
    EmptyBoard,
    /// A move targeted a coordinate outside the board.
    #[display("{coord} is outside the {size} board")]
    OutOfBounds {
        /// The coordinate.
        coord: Coord,
        /// The board dimensions.
        size: BoardSize,
    },
    /// A reveal targeted a cell that is already revealed.
    #[display("{coord} is already revealed")]
    AlreadyRevealed {
        /// The cell.
        coord: Coord,
    },
    /// A reveal targeted a flagged cell.
    #[display("cannot reveal flagged cell {coord}")]
    RevealOnFlagged {
        /// The cell.
        coord: Coord,
    },
    /// A flag was toggled on a revealed cell.
    #[display("cannot flag revealed cell {coord}")]
    FlagOnRevealed {
        /// The cell.
        coord: Coord,
    },
    /// A fixed layout named the same mine twice or a mine off the board.
    #[display("invalid mine layout at {coord}")]
    InvalidLayout {
        /// The offending coordinate.
        coord: Coord,
    },
}
