use mineproof_core::{BoardView, Coord};

use crate::GameState;

/// A notification published on the [`EventBus`](crate::EventBus).
///
/// Board deltas carry a fresh snapshot together with the cells that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new game began.
    GameStarted {
        /// The initial board.
        view: BoardView,
    },
    /// Cells were revealed by one move, including any flood fill.
    TilesRevealed {
        /// The board after the move.
        view: BoardView,
        /// The newly revealed cells.
        coords: Vec<Coord>,
    },
    /// Cells were flagged.
    TilesFlagged {
        /// The board after the move.
        view: BoardView,
        /// The newly flagged cells.
        coords: Vec<Coord>,
    },
    /// Flags were removed.
    TilesUnflagged {
        /// The board after the move.
        view: BoardView,
        /// The cells that lost their flag.
        coords: Vec<Coord>,
    },
    /// The game reached a final state.
    GameOver {
        /// The final state.
        state: GameState,
    },
    /// The agent is stuck and waits for an external decision.
    GuessRequested,
    /// The agent consumed an external decision.
    GuessResolved,
}

/// The subscription key of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum EventKind {
    /// [`Event::GameStarted`].
    #[display("game started")]
    GameStarted,
    /// [`Event::TilesRevealed`].
    #[display("tiles revealed")]
    TilesRevealed,
    /// [`Event::TilesFlagged`].
    #[display("tiles flagged")]
    TilesFlagged,
    /// [`Event::TilesUnflagged`].
    #[display("tiles unflagged")]
    TilesUnflagged,
    /// [`Event::GameOver`].
    #[display("game over")]
    GameOver,
    /// [`Event::GuessRequested`].
    #[display("guess requested")]
    GuessRequested,
    /// [`Event::GuessResolved`].
    #[display("guess resolved")]
    GuessResolved,
}

impl Event {
    /// Returns the kind used to route this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::GameStarted { .. } => EventKind::GameStarted,
            Self::TilesRevealed { .. } => EventKind::TilesRevealed,
            Self::TilesFlagged { .. } => EventKind::TilesFlagged,
            Self::TilesUnflagged { .. } => EventKind::TilesUnflagged,
            Self::GameOver { .. } => EventKind::GameOver,
            Self::GuessRequested => EventKind::GuessRequested,
            Self::GuessResolved => EventKind::GuessResolved,
        }
    }

    /// Returns the board snapshot carried by the event, if any.
    #[must_use]
    pub const fn view(&self) -> Option<&BoardView> {
        match self {
            Self::GameStarted { view }
            | Self::TilesRevealed { view, .. }
            | Self::TilesFlagged { view, .. }
            | Self::TilesUnflagged { view, .. } => Some(view),
            Self::GameOver { .. } | Self::GuessRequested | Self::GuessResolved => None,
        }
    }
}
