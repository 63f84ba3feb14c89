use mineproof_core::{BoardSize, Coord};

use crate::Constraint;

/// Fatal errors raised by the constraint store and the inference engine.
///
/// Every variant signals that the solver's picture of the board no longer
/// matches the simulator. None of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    /// A cell was proven to be both a mine and safe in a single pass.
    #[display("{coord} proven both mine and safe by {} constraints", constraints.len())]
    Contradiction {
        /// The contradictory cell.
        coord: Coord,
        /// Every live constraint that mentions the cell.
        constraints: Vec<Constraint>,
    },
    /// Two constraints cannot both hold on any assignment of their cells.
    #[display("constraints from {} and {} cannot both hold", first.source(), second.source())]
    InconsistentPair {
        /// The lesser constraint of the pair.
        first: Constraint,
        /// The greater constraint of the pair.
        second: Constraint,
    },
    /// A cell was reported revealed twice with different counts.
    #[display("{coord} already recorded with count {recorded}, now reported as {observed}")]
    Desynchronized {
        /// The cell.
        coord: Coord,
        /// Count recorded first.
        recorded: u8,
        /// Conflicting count reported later.
        observed: u8,
    },
    /// A revealed cell was reported as flagged.
    #[display("{coord} is revealed and cannot carry a flag")]
    FlaggedRevealedCell {
        /// The cell.
        coord: Coord,
    },
    /// A numbered cell's budget cannot be satisfied by its unknown neighbours.
    #[display("{clue} needs {remaining} more mines among {unknowns} unknown cells")]
    ImpossibleConstraint {
        /// The numbered cell.
        clue: Coord,
        /// Count minus flagged neighbours; may be negative.
        remaining: i16,
        /// Number of hidden, unflagged neighbours.
        unknowns: usize,
    },
    /// A coordinate outside the board was reported.
    #[display("{coord} is outside the {size} board")]
    OutOfBounds {
        /// The coordinate.
        coord: Coord,
        /// The board dimensions.
        size: BoardSize,
    },
}
