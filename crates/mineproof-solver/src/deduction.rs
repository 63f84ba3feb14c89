use std::collections::BTreeSet;

use mineproof_core::{Coord, Move};

/// Cells proven to be mines or safe.
///
/// Both sets are ordered, so two deductions proving the same facts compare
/// equal regardless of the order in which the facts were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduction {
    mines: BTreeSet<Coord>,
    safes: BTreeSet<Coord>,
}

impl Deduction {
    /// Creates an empty deduction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cells proven to hold a mine.
    #[must_use]
    pub fn mines(&self) -> &BTreeSet<Coord> {
        &self.mines
    }

    /// Returns the cells proven safe.
    #[must_use]
    pub fn safes(&self) -> &BTreeSet<Coord> {
        &self.safes
    }

    /// Returns `true` if nothing was proven.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safes.is_empty()
    }

    /// Marks cells as mines.
    pub fn add_mines<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Coord>,
    {
        self.mines.extend(coords);
    }

    /// Marks cells as safe.
    pub fn add_safes<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = Coord>,
    {
        self.safes.extend(coords);
    }

    /// Adds every fact of `other`.
    pub fn merge(&mut self, other: Deduction) {
        self.mines.extend(other.mines);
        self.safes.extend(other.safes);
    }

    /// Returns the first cell proven both mine and safe, if any.
    #[must_use]
    pub fn first_conflict(&self) -> Option<Coord> {
        self.mines.intersection(&self.safes).next().copied()
    }

    /// Converts the deduction into moves: every flag first, then every reveal.
    #[must_use]
    pub fn into_moves(self) -> Vec<Move> {
        self.mines
            .into_iter()
            .map(Move::Flag)
            .chain(self.safes.into_iter().map(Move::Reveal))
            .collect()
    }
}
