//! Game construction shared by `play` and `bench`.

use mineproof_agent::{AgentOptions, GameController, OracleReceiver, SolverAgent};
use mineproof_game::{Board, EventBus, GameConfig};

/// Builds a game with a [`SolverAgent`] subscribed to `bus`.
///
/// `seed` drives both the mine layout and the agent's opening move.
#[must_use]
pub fn new_game(
    config: GameConfig,
    seed: u64,
    bus: EventBus,
    oracle: OracleReceiver,
) -> GameController<SolverAgent> {
    let board = Board::new(config, seed);
    let options = AgentOptions {
        // Keep the opening independent of the layout stream.
        seed: Some(seed.rotate_left(32)),
        ..AgentOptions::default()
    };
    let agent = SolverAgent::new(&board.view(), &bus, oracle, options);
    GameController::new(board, bus, agent)
}
