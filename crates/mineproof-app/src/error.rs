use mineproof_agent::ControllerError;
use mineproof_game::GameError;

/// Errors that end the program with a failure status.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    /// The requested board cannot be built.
    #[display("invalid board: {_0}")]
    Config(GameError),
    /// The game stopped on a fatal error.
    #[display("game aborted: {_0}")]
    Game(ControllerError),
    /// `bench` was asked to play no games.
    #[display("at least one game is required")]
    #[from(ignore)]
    NoGames,
}
