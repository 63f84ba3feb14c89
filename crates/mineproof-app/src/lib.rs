//! Command-line front end for the Mineproof solver.
//!
//! - `play` runs one game in the terminal, forwarding guesses typed on stdin.
//! - `bench` runs many headless games in parallel and reports how far pure
//!   deduction gets.

pub mod bench;
pub mod cli;
pub mod console;
pub mod game_factory;
pub mod version;

pub use self::error::AppError;

mod error;
