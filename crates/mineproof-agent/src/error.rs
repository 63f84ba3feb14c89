use mineproof_game::GameError;
use mineproof_solver::SolverError;

/// Errors raised while an agent picks its next move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AgentError {
    /// The solver's picture of the board is inconsistent.
    #[display("solver failure: {_0}")]
    Solver(SolverError),
}

/// Errors that stop a [`GameController`](crate::GameController).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ControllerError {
    /// The board rejected a move.
    #[display("board rejected move: {_0}")]
    Game(GameError),
    /// The agent failed to produce a move.
    #[display("{_0}")]
    Agent(AgentError),
}
