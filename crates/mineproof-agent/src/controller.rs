use mineproof_core::Move;
use mineproof_game::{Board, Event, EventBus, GameState};

use crate::{Agent, ControllerError};

/// Drives one game: asks the agent for moves, applies them to the board and
/// publishes what changed.
///
/// # Examples
///
/// ```
/// use mineproof_agent::{AgentOptions, GameController, SolverAgent, oracle_channel};
/// use mineproof_core::{BoardSize, Coord};
/// use mineproof_game::{Board, EventBus, GameState};
///
/// let board = Board::from_mines(BoardSize::new(3, 3), [Coord::new(0, 0)])?;
/// let bus = EventBus::new();
/// let (tx, rx) = oracle_channel();
/// // Headless: a game that needs a guess ends as idle.
/// drop(tx);
/// let options = AgentOptions {
///     opening: Some(Coord::new(2, 2)),
///     ..AgentOptions::default()
/// };
/// let agent = SolverAgent::new(&board.view(), &bus, rx, options);
///
/// let mut controller = GameController::new(board, bus, agent);
/// assert_eq!(controller.run()?, GameState::Won);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct GameController<A> {
    board: Board,
    bus: EventBus,
    agent: A,
    state: GameState,
    moves: usize,
}

impl<A> GameController<A>
where
    A: Agent,
{
    /// Starts a game and publishes [`Event::GameStarted`].
    pub fn new(board: Board, bus: EventBus, agent: A) -> Self {
        bus.publish(&Event::GameStarted { view: board.view() });
        Self {
            board,
            bus,
            agent,
            state: GameState::Running,
            moves: 0,
        }
    }

    /// Returns the current game state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the agent.
    #[must_use]
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Returns the number of moves applied to the board.
    #[must_use]
    pub fn moves_played(&self) -> usize {
        self.moves
    }

    /// Plays one move and returns the resulting state.
    ///
    /// Does nothing once the game is over.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::Agent`] if the agent fails.
    /// - [`ControllerError::Game`] if the board rejects the move.
    pub fn step(&mut self) -> Result<GameState, ControllerError> {
        if self.state.is_over() {
            return Ok(self.state);
        }

        let next = self.agent.choose_action(&self.board.view())?;
        match next {
            Move::OutOfMoves => {
                log::info!("agent is out of moves after {} moves", self.moves);
                return Ok(self.end(GameState::Idle));
            }
            Move::Reveal(coord) => {
                let coords = self.board.reveal(coord)?;
                self.bus.publish(&Event::TilesRevealed {
                    view: self.board.view(),
                    coords,
                });
            }
            Move::Flag(coord) => {
                let view_coords = vec![coord];
                let event = if self.board.toggle_flag(coord)? {
                    Event::TilesFlagged {
                        view: self.board.view(),
                        coords: view_coords,
                    }
                } else {
                    Event::TilesUnflagged {
                        view: self.board.view(),
                        coords: view_coords,
                    }
                };
                self.bus.publish(&event);
            }
        }
        self.moves += 1;

        if self.board.lost() {
            return Ok(self.end(GameState::Lost));
        }
        if let Some(coords) = self.board.finish() {
            if !coords.is_empty() {
                self.bus.publish(&Event::TilesFlagged {
                    view: self.board.view(),
                    coords,
                });
            }
            return Ok(self.end(GameState::Won));
        }
        Ok(self.state)
    }

    /// Plays until the game is over.
    ///
    /// # Errors
    ///
    /// Propagates the first error of [`step`](Self::step).
    pub fn run(&mut self) -> Result<GameState, ControllerError> {
        while !self.step()?.is_over() {}
        Ok(self.state)
    }

    fn end(&mut self, state: GameState) -> GameState {
        log::info!("game over: {state} after {} moves", self.moves);
        self.state = state;
        self.bus.publish(&Event::GameOver { state });
        state
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use mineproof_core::{BoardSize, BoardView, Coord};
    use mineproof_game::EventKind;

    use super::*;
    use crate::AgentError;

    /// Plays a fixed script, then gives up.
    #[derive(Debug)]
    struct Scripted(Vec<Move>);

    impl Agent for Scripted {
        fn choose_action(&mut self, _view: &BoardView) -> Result<Move, AgentError> {
            Ok(if self.0.is_empty() {
                Move::OutOfMoves
            } else {
                self.0.remove(0)
            })
        }
    }

    fn c(row: u16, col: u16) -> Coord {
        Coord::new(row, col)
    }

    fn record(bus: &EventBus) -> Rc<RefCell<Vec<EventKind>>> {
        let kinds = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            EventKind::GameStarted,
            EventKind::TilesRevealed,
            EventKind::TilesFlagged,
            EventKind::TilesUnflagged,
            EventKind::GameOver,
        ] {
            let kinds = Rc::clone(&kinds);
            bus.subscribe(kind, move |event| kinds.borrow_mut().push(event.kind()));
        }
        kinds
    }

    #[test]
    fn test_win_publishes_auto_flags_before_game_over() {
        let bus = EventBus::new();
        let kinds = record(&bus);
        let board = Board::from_mines(BoardSize::new(1, 3), [c(0, 2)]).unwrap();
        // (0, 1) borders the mine, so it does not flood.
        let agent = Scripted(vec![Move::Reveal(c(0, 1)), Move::Reveal(c(0, 0))]);

        let mut controller = GameController::new(board, bus, agent);
        assert_eq!(controller.run().unwrap(), GameState::Won);
        assert_eq!(controller.moves_played(), 2);
        assert_eq!(
            *kinds.borrow(),
            [
                EventKind::GameStarted,
                EventKind::TilesRevealed,
                EventKind::TilesRevealed,
                EventKind::TilesFlagged,
                EventKind::GameOver,
            ]
        );
    }

    #[test]
    fn test_loss_on_mine() {
        let bus = EventBus::new();
        let board = Board::from_mines(BoardSize::new(1, 3), [c(0, 2)]).unwrap();
        let mut controller = GameController::new(board, bus, Scripted(vec![Move::Reveal(c(0, 2))]));
        assert_eq!(controller.step().unwrap(), GameState::Lost);
        // Further steps are no-ops.
        assert_eq!(controller.step().unwrap(), GameState::Lost);
        assert_eq!(controller.moves_played(), 1);
    }

    #[test]
    fn test_out_of_moves_is_idle() {
        let bus = EventBus::new();
        let kinds = record(&bus);
        let board = Board::from_mines(BoardSize::new(2, 2), [c(0, 0)]).unwrap();
        let mut controller = GameController::new(board, bus, Scripted(vec![]));
        assert_eq!(controller.run().unwrap(), GameState::Idle);
        assert_eq!(*kinds.borrow(), [EventKind::GameStarted, EventKind::GameOver]);
    }

    #[test]
    fn test_flag_toggle_publishes_flag_and_unflag() {
        let bus = EventBus::new();
        let kinds = record(&bus);
        let board = Board::from_mines(BoardSize::new(2, 2), [c(0, 0)]).unwrap();
        let agent = Scripted(vec![Move::Flag(c(0, 0)), Move::Flag(c(0, 0))]);
        let mut controller = GameController::new(board, bus, agent);
        controller.step().unwrap();
        controller.step().unwrap();
        assert_eq!(
            kinds.borrow()[1..],
            [EventKind::TilesFlagged, EventKind::TilesUnflagged]
        );
    }

    #[test]
    fn test_board_rejection_is_fatal() {
        let bus = EventBus::new();
        let board = Board::from_mines(BoardSize::new(2, 2), [c(0, 0)]).unwrap();
        let agent = Scripted(vec![Move::Reveal(c(9, 9))]);
        let mut controller = GameController::new(board, bus, agent);
        assert!(matches!(
            controller.step(),
            Err(ControllerError::Game(mineproof_game::GameError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_second_reveal_of_a_cell_is_fatal() {
        let bus = EventBus::new();
        let kinds = record(&bus);
        let board = Board::from_mines(BoardSize::new(2, 2), [c(0, 0)]).unwrap();
        let agent = Scripted(vec![Move::Reveal(c(1, 1)), Move::Reveal(c(1, 1))]);
        let mut controller = GameController::new(board, bus, agent);
        assert_eq!(controller.step().unwrap(), GameState::Running);
        assert_eq!(
            controller.step().unwrap_err(),
            ControllerError::Game(mineproof_game::GameError::AlreadyRevealed { coord: c(1, 1) })
        );
        assert_eq!(controller.moves_played(), 1);
        assert_eq!(
            *kinds.borrow(),
            [EventKind::GameStarted, EventKind::TilesRevealed]
        );
    }
}
