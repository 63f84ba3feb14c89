use std::collections::BTreeSet;

use mineproof_core::Coord;

use crate::SolverError;

/// A numbered cell paired with the mines still missing among its unknown neighbours.
///
/// `remaining` is the revealed count minus the flagged neighbours, and
/// `unknowns` are the neighbours that are neither revealed nor flagged.
/// A constraint always satisfies `remaining <= unknowns.len()`.
///
/// # Examples
///
/// ```
/// use mineproof_core::Coord;
/// use mineproof_solver::Constraint;
///
/// let constraint = Constraint::new(
///     Coord::new(1, 1),
///     1,
///     [Coord::new(0, 0), Coord::new(0, 1)],
/// )?;
/// assert_eq!(constraint.remaining(), 1);
/// assert_eq!(constraint.len(), 2);
/// # Ok::<(), mineproof_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Constraint {
    source: Coord,
    remaining: u8,
    unknowns: BTreeSet<Coord>,
}

impl Constraint {
    /// Creates a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ImpossibleConstraint`] if `remaining` exceeds the
    /// number of unknown cells.
    pub fn new<I>(source: Coord, remaining: u8, unknowns: I) -> Result<Self, SolverError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let unknowns: BTreeSet<Coord> = unknowns.into_iter().collect();
        if usize::from(remaining) > unknowns.len() {
            return Err(SolverError::ImpossibleConstraint {
                clue: source,
                remaining: i16::from(remaining),
                unknowns: unknowns.len(),
            });
        }
        Ok(Self {
            source,
            remaining,
            unknowns,
        })
    }

    /// Returns the numbered cell this constraint was derived from.
    #[must_use]
    pub fn source(&self) -> Coord {
        self.source
    }

    /// Returns the number of mines still hidden among the unknowns.
    #[must_use]
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Returns the hidden, unflagged neighbours of the source cell.
    #[must_use]
    pub fn unknowns(&self) -> &BTreeSet<Coord> {
        &self.unknowns
    }

    /// Returns the number of unknown cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    /// Returns `true` if no unknown cell is left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }

    /// Returns `true` if the constraint mentions `coord`.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.unknowns.contains(&coord)
    }

    /// Returns `true` if this constraint's unknowns are a strict subset of `other`'s.
    #[must_use]
    pub fn is_strict_subset_of(&self, other: &Self) -> bool {
        self.len() < other.len() && self.unknowns.is_subset(&other.unknowns)
    }
}
