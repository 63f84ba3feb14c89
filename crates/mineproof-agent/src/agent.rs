use mineproof_core::{BoardView, Move};

use crate::AgentError;

/// Something that plays Minesweeper one move at a time.
pub trait Agent {
    /// Picks the next move for the board shown in `view`.
    ///
    /// Returning [`Move::OutOfMoves`] ends the game without an outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`AgentError`] when the agent can no longer trust its own
    /// state. Such errors are fatal for the game.
    fn choose_action(&mut self, view: &BoardView) -> Result<Move, AgentError>;
}
