//! Core data structures shared by the Mineproof solver, simulator and agent.
//!
//! # Overview
//!
//! - [`Coord`] and [`BoardSize`]: rectangular coordinates and the
//!   8-neighbourhood used by every rule in the workspace.
//! - [`BoardView`] and [`CellView`]: the read-only snapshot a player (or an
//!   agent) is allowed to see. Mine identity of unrevealed cells is never
//!   part of a view.
//! - [`Move`] and [`MoveKind`]: actions an agent hands back to the controller.
//!
//! # Examples
//!
//! ```
//! use mineproof_core::{BoardView, Coord, Move, MoveKind};
//!
//! let view: BoardView = "
//!     0 1 _
//!     0 1 _
//! "
//! .parse()?;
//!
//! let hidden: Vec<_> = view
//!     .iter()
//!     .filter(|(_, cell)| cell.is_hidden())
//!     .map(|(coord, _)| coord)
//!     .collect();
//! assert_eq!(hidden, [Coord::new(0, 2), Coord::new(1, 2)]);
//! assert_eq!(Move::new(MoveKind::Flag, hidden[0]), Move::Flag(Coord::new(0, 2)));
//! # Ok::<(), mineproof_core::ParseBoardViewError>(())
//! ```

pub use self::{
    board_view::{BoardView, CellView, ParseBoardViewError},
    coord::{BoardSize, Coord, Coords, Neighbors},
    moves::{Move, MoveKind},
};

mod board_view;
mod coord;
mod moves;
