use std::collections::{BTreeMap, BTreeSet};

use mineproof_core::{BoardSize, BoardView, CellView, Coord, Neighbors};

use crate::{Constraint, SolverError};

/// Accumulated observations of a single game.
///
/// The store is the only place facts are kept: revealed counts accumulate
/// monotonically and are never retracted, flags toggle, and the dimensions are
/// reset once per game. Constraints are derived on demand from the facts and
/// never cached.
///
/// # Examples
///
/// ```
/// use mineproof_core::{BoardSize, Coord};
/// use mineproof_solver::ConstraintStore;
///
/// let mut store = ConstraintStore::new(BoardSize::new(2, 2));
/// store.record_revealed(Coord::new(0, 0), 1)?;
/// store.record_flag(Coord::new(1, 1))?;
///
/// // (0, 0) sees one mine and it is already flagged: the other neighbours are safe.
/// assert!(store.constraints()?.iter().all(|c| c.remaining() == 0));
/// # Ok::<(), mineproof_solver::SolverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStore {
    size: BoardSize,
    revealed: BTreeMap<Coord, u8>,
    flagged: BTreeSet<Coord>,
}

impl ConstraintStore {
    /// Creates an empty store for a board of the given size.
    #[must_use]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            revealed: BTreeMap::new(),
            flagged: BTreeSet::new(),
        }
    }

    /// Builds a store holding every revealed count and flag visible in `view`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`record_revealed`](Self::record_revealed)
    /// and [`record_flag`](Self::record_flag).
    pub fn from_view(view: &BoardView) -> Result<Self, SolverError> {
        let mut store = Self::new(view.size());
        for (coord, cell) in view.iter() {
            match cell {
                CellView::Revealed(count) => {
                    store.record_revealed(coord, count)?;
                }
                CellView::Flagged => {
                    store.record_flag(coord)?;
                }
                CellView::Hidden | CellView::Exploded => {}
            }
        }
        Ok(store)
    }

    /// Drops every fact and sets new board dimensions.
    pub fn initialize(&mut self, size: BoardSize) {
        self.size = size;
        self.revealed.clear();
        self.flagged.clear();
    }

    /// Returns the board dimensions.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Records that `coord` was revealed with `count` adjacent mines.
    ///
    /// Recording the same fact twice is a no-op. A revealed cell loses any
    /// flag it carried.
    ///
    /// Returns `true` if the fact was new.
    ///
    /// # Errors
    ///
    /// - [`SolverError::OutOfBounds`] if `coord` is not on the board.
    /// - [`SolverError::Desynchronized`] if `coord` was already recorded with a
    ///   different count.
    pub fn record_revealed(&mut self, coord: Coord, count: u8) -> Result<bool, SolverError> {
        self.check_bounds(coord)?;
        if let Some(&recorded) = self.revealed.get(&coord) {
            if recorded != count {
                return Err(SolverError::Desynchronized {
                    coord,
                    recorded,
                    observed: count,
                });
            }
            return Ok(false);
        }
        self.revealed.insert(coord, count);
        self.flagged.remove(&coord);
        Ok(true)
    }

    /// Records a flag on `coord`.
    ///
    /// Returns `true` if the cell was not flagged before.
    ///
    /// # Errors
    ///
    /// - [`SolverError::OutOfBounds`] if `coord` is not on the board.
    /// - [`SolverError::FlaggedRevealedCell`] if `coord` is already revealed.
    pub fn record_flag(&mut self, coord: Coord) -> Result<bool, SolverError> {
        self.check_bounds(coord)?;
        if self.revealed.contains_key(&coord) {
            return Err(SolverError::FlaggedRevealedCell { coord });
        }
        Ok(self.flagged.insert(coord))
    }

    /// Removes a flag from `coord`.
    ///
    /// Returns `true` if the cell was flagged.
    pub fn clear_flag(&mut self, coord: Coord) -> bool {
        self.flagged.remove(&coord)
    }

    /// Returns the recorded count of a revealed cell.
    #[must_use]
    pub fn revealed_count(&self, coord: Coord) -> Option<u8> {
        self.revealed.get(&coord).copied()
    }

    /// Returns `true` if `coord` carries a flag.
    #[must_use]
    pub fn is_flagged(&self, coord: Coord) -> bool {
        self.flagged.contains(&coord)
    }

    /// Returns `true` if `coord` is neither revealed nor flagged.
    #[must_use]
    pub fn is_unknown(&self, coord: Coord) -> bool {
        !self.revealed.contains_key(&coord) && !self.flagged.contains(&coord)
    }

    /// Returns the number of revealed cells recorded so far.
    #[must_use]
    pub fn revealed_len(&self) -> usize {
        self.revealed.len()
    }

    /// Returns the in-bounds cells adjacent to `coord`.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Neighbors {
        self.size.neighbors(coord)
    }

    /// Derives the live constraints, ordered by source cell.
    ///
    /// Numbered cells without unknown neighbours are resolved and omitted.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ImpossibleConstraint`] if a numbered cell has
    /// more flagged neighbours than its count, or fewer unknown neighbours
    /// than the mines it still misses.
    pub fn constraints(&self) -> Result<Vec<Constraint>, SolverError> {
        let mut constraints = Vec::new();
        for (&source, &count) in &self.revealed {
            let mut flagged = 0i16;
            let mut unknowns = Vec::new();
            for neighbor in self.neighbors(source) {
                if self.flagged.contains(&neighbor) {
                    flagged += 1;
                } else if !self.revealed.contains_key(&neighbor) {
                    unknowns.push(neighbor);
                }
            }

            let remaining = i16::from(count) - flagged;
            let impossible = || SolverError::ImpossibleConstraint {
                clue: source,
                remaining,
                unknowns: unknowns.len(),
            };
            let Ok(budget) = u8::try_from(remaining) else {
                return Err(impossible());
            };
            if usize::from(budget) > unknowns.len() {
                return Err(impossible());
            }
            if unknowns.is_empty() {
                continue;
            }
            constraints.push(Constraint::new(source, budget, unknowns)?);
        }
        Ok(constraints)
    }

    fn check_bounds(&self, coord: Coord) -> Result<(), SolverError> {
        if self.size.contains(coord) {
            Ok(())
        } else {
            Err(SolverError::OutOfBounds {
                coord,
                size: self.size,
            })
        }
    }
}
