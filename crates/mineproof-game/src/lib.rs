//! Reference Minesweeper simulator and notification bus.
//!
//! [`Board`] owns the ground truth: mine placement, flood-fill reveals, flags
//! and the win/loss rules. Changes are announced as [`Event`]s on an
//! [`EventBus`], which is how agents and front ends learn about the board.
//!
//! # Examples
//!
//! ```
//! use mineproof_core::Coord;
//! use mineproof_game::{Board, GameConfig};
//!
//! let mut board = Board::new(GameConfig::BEGINNER, 1);
//! board.reveal(Coord::new(0, 0))?;
//! println!("{}", board.view());
//! # Ok::<(), mineproof_game::GameError>(())
//! ```

pub use self::{
    board::Board, config::GameConfig, error::GameError, event_bus::EventBus, events::*,
    state::GameState,
};

mod board;
mod config;
mod error;
mod event_bus;
mod events;
mod state;
