use crate::Coord;

/// The kind of action a player can take on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum MoveKind {
    /// Open the cell.
    #[display("reveal")]
    Reveal,
    /// Toggle a mine marker on the cell.
    #[display("flag")]
    Flag,
}

/// A move emitted by an agent for the controller to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Move {
    /// Reveal the cell.
    #[display("reveal {_0}")]
    Reveal(Coord),
    /// Flag the cell.
    #[display("flag {_0}")]
    Flag(Coord),
    /// The agent has nothing left to play.
    #[display("out of moves")]
    OutOfMoves,
}

impl Move {
    /// Builds a move of the given kind targeting `coord`.
    #[must_use]
    pub const fn new(kind: MoveKind, coord: Coord) -> Self {
        match kind {
            MoveKind::Reveal => Self::Reveal(coord),
            MoveKind::Flag => Self::Flag(coord),
        }
    }

    /// Returns the targeted cell, if any.
    #[must_use]
    pub const fn coord(self) -> Option<Coord> {
        match self {
            Self::Reveal(coord) | Self::Flag(coord) => Some(coord),
            Self::OutOfMoves => None,
        }
    }

    /// Returns the kind of the move, if it targets a cell.
    #[must_use]
    pub const fn kind(self) -> Option<MoveKind> {
        match self {
            Self::Reveal(_) => Some(MoveKind::Reveal),
            Self::Flag(_) => Some(MoveKind::Flag),
            Self::OutOfMoves => None,
        }
    }
}
