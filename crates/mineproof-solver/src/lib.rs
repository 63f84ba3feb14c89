//! Logical inference for Minesweeper.
//!
//! # Overview
//!
//! - [`ConstraintStore`] accumulates what the player has seen: revealed counts
//!   and flags. It derives one [`Constraint`] per numbered cell that still
//!   touches unknown cells.
//! - [`technique`] holds the proof rules, from the single-constraint rule up
//!   to pairwise bounds on overlapping constraints.
//! - [`InferenceEngine`] escalates through the techniques and returns the first
//!   non-empty [`Deduction`]: cells proven to be mines and cells proven safe.
//!
//! Nothing here guesses. An empty deduction means the position cannot be
//! resolved by logic alone. Constraints that cannot all hold are reported as
//! a [`SolverError`], never as an empty deduction.
//!
//! # Examples
//!
//! ```
//! use mineproof_core::{BoardView, Coord, Move};
//! use mineproof_solver::{ConstraintStore, InferenceEngine};
//!
//! let view: BoardView = "
//!     _ _ _
//!     1 2 1
//! "
//! .parse()?;
//! let store = ConstraintStore::from_view(&view)?;
//! let deduction = InferenceEngine::with_all_techniques().deduce(&store.constraints()?)?;
//!
//! assert_eq!(
//!     deduction.into_moves(),
//!     [
//!         Move::Flag(Coord::new(0, 0)),
//!         Move::Flag(Coord::new(0, 2)),
//!     ]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    constraint::Constraint,
    deduction::Deduction,
    engine::{EngineStats, InferenceEngine},
    error::SolverError,
    store::ConstraintStore,
    technique::{BoxedTechnique, Technique},
};

mod constraint;
mod deduction;
mod engine;
mod error;
mod store;
pub mod technique;

#[cfg(test)]
mod testing;
