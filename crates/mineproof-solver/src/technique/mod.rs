//! Minesweeper inference techniques.
//!
//! Each technique implements the [`Technique`] trait and turns a set of live
//! constraints into proven mines and safe cells. Techniques are pure: the same
//! constraints, in any order, always produce the same [`Deduction`] or the
//! same error.

use std::{collections::BTreeMap, fmt::Debug};

use mineproof_core::Coord;

pub use self::{
    pairwise_bound::PairwiseBound, single_constraint::SingleConstraint,
    subset::SubsetDifference,
};
use crate::{Constraint, Deduction, SolverError};

mod pairwise_bound;
mod single_constraint;
mod subset;

/// Returns all available techniques.
///
/// Techniques are ordered from cheapest to most expensive, which is also the
/// escalation order used by [`InferenceEngine`](crate::InferenceEngine).
#[must_use]
pub fn all_techniques() -> Vec<BoxedTechnique> {
    vec![
        Box::new(SingleConstraint::new()),
        Box::new(SubsetDifference::new()),
        Box::new(PairwiseBound::new()),
    ]
}

/// Returns the fundamental techniques.
///
/// Only the single-constraint rule: a constraint whose budget is zero clears
/// its unknowns, and one whose budget equals its unknown count mines them all.
///
/// # Examples
///
/// ```
/// use mineproof_solver::technique;
///
/// let techniques = technique::fundamental_techniques();
/// assert_eq!(techniques.len(), 1);
/// ```
#[must_use]
pub fn fundamental_techniques() -> Vec<BoxedTechnique> {
    vec![Box::new(SingleConstraint::new())]
}

/// A trait representing a Minesweeper inference technique.
pub trait Technique: Debug + Send + Sync {
    /// Returns the name of the technique.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedTechnique;

    /// Returns everything this technique alone proves from `constraints`.
    ///
    /// An empty [`Deduction`] means the technique found nothing. Inconsistent
    /// input may yield a deduction with a cell in both sets; callers check.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InconsistentPair`] if two constraints the
    /// technique compares cannot both hold.
    fn deduce(&self, constraints: &[Constraint]) -> Result<Deduction, SolverError>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

impl Clone for BoxedTechnique {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// The least inconsistent pair found in a pass.
///
/// Keeping the minimum makes the reported pair independent of input order.
#[derive(Debug, Default)]
struct Conflict<'a>(Option<(&'a Constraint, &'a Constraint)>);

impl<'a> Conflict<'a> {
    fn record(&mut self, a: &'a Constraint, b: &'a Constraint) {
        let pair = if a <= b { (a, b) } else { (b, a) };
        log::debug!("{} and {} cannot both hold", pair.0.source(), pair.1.source());
        self.0 = Some(self.0.map_or(pair, |seen| seen.min(pair)));
    }

    fn into_result(self, deduction: Deduction) -> Result<Deduction, SolverError> {
        match self.0 {
            Some((first, second)) => Err(SolverError::InconsistentPair {
                first: first.clone(),
                second: second.clone(),
            }),
            None => Ok(deduction),
        }
    }
}

/// Returns every unordered pair `(i, j)`, `i < j`, of constraints sharing at least one cell.
fn overlapping_pairs(constraints: &[Constraint]) -> Vec<(usize, usize)> {
    let mut by_cell: BTreeMap<Coord, Vec<usize>> = BTreeMap::new();
    for (i, constraint) in constraints.iter().enumerate() {
        for &coord in constraint.unknowns() {
            by_cell.entry(coord).or_default().push(i);
        }
    }

    let mut pairs: Vec<(usize, usize)> = by_cell
        .values()
        .flat_map(|indices| {
            indices
                .iter()
                .enumerate()
                .flat_map(move |(n, &i)| indices[n + 1..].iter().map(move |&j| (i, j)))
        })
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}
