use std::collections::BTreeSet;

use mineproof_core::Coord;

use super::{BoxedTechnique, Conflict, overlapping_pairs};
use crate::{Constraint, Deduction, SolverError, technique::Technique};

const NAME: &str = "pairwise bound";

/// A technique that bounds the mines shared by two overlapping constraints.
///
/// For constraints `A` and `B` whose unknowns overlap without one containing
/// the other, the shared region `S = A ∩ B` holds between
///
/// - `max(0, A.remaining - |A - S|, B.remaining - |B - S|)` and
/// - `min(|S|, A.remaining, B.remaining)`
///
/// mines. If the upper bound is zero, `S` is safe; if the lower bound is
/// `|S|`, `S` is all mines. The same bounds then pin the mines left for
/// `A - S` and `B - S`, which are resolved the same way. A lower bound above
/// the upper bound means the pair cannot both hold, which is an error.
///
/// # Examples
///
/// ```
/// use mineproof_core::Coord;
/// use mineproof_solver::{
///     Constraint,
///     technique::{PairwiseBound, Technique},
/// };
///
/// // A = {(0, 0), (0, 1), (0, 2)} holds one mine,
/// // B = {(0, 1), (0, 2), (0, 3)} holds two.
/// let a = Constraint::new(
///     Coord::new(1, 0),
///     1,
///     [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
/// )?;
/// let b = Constraint::new(
///     Coord::new(1, 3),
///     2,
///     [Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3)],
/// )?;
/// let deduction = PairwiseBound::new().deduce(&[a, b])?;
/// assert!(deduction.safes().contains(&Coord::new(0, 0)));
/// assert!(deduction.mines().contains(&Coord::new(0, 3)));
/// # Ok::<(), mineproof_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PairwiseBound;

impl PairwiseBound {
    /// Creates a new `PairwiseBound` technique.
    #[must_use]
    pub const fn new() -> Self {
        PairwiseBound
    }
}

impl Technique for PairwiseBound {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn deduce(&self, constraints: &[Constraint]) -> Result<Deduction, SolverError> {
        let mut deduction = Deduction::new();
        let mut conflict = Conflict::default();
        for (i, j) in overlapping_pairs(constraints) {
            let (a, b) = (&constraints[i], &constraints[j]);
            if a.unknowns().is_subset(b.unknowns()) || b.unknowns().is_subset(a.unknowns()) {
                continue;
            }
            if !apply_pair(a, b, &mut deduction) {
                conflict.record(a, b);
            }
        }
        conflict.into_result(deduction)
    }
}

/// Returns `false` if the shared region has no consistent mine count.
fn apply_pair(a: &Constraint, b: &Constraint, deduction: &mut Deduction) -> bool {
    let shared: BTreeSet<Coord> = a.unknowns().intersection(b.unknowns()).copied().collect();
    let only_a: BTreeSet<Coord> = a.unknowns().difference(&shared).copied().collect();
    let only_b: BTreeSet<Coord> = b.unknowns().difference(&shared).copied().collect();

    let a_rem = usize::from(a.remaining());
    let b_rem = usize::from(b.remaining());
    let lower = a_rem
        .saturating_sub(only_a.len())
        .max(b_rem.saturating_sub(only_b.len()));
    let upper = shared.len().min(a_rem).min(b_rem);
    if lower > upper {
        return false;
    }

    resolve_region(&shared, lower, upper, deduction);
    // mines(A - S) = A.remaining - mines(S), so its range mirrors the shared one.
    resolve_region(&only_a, a_rem - upper, a_rem - lower, deduction);
    resolve_region(&only_b, b_rem - upper, b_rem - lower, deduction);
    true
}

fn resolve_region(region: &BTreeSet<Coord>, lower: usize, upper: usize, deduction: &mut Deduction) {
    if region.is_empty() {
        return;
    }
    if upper == 0 {
        deduction.add_safes(region.iter().copied());
    } else if lower == region.len() {
        deduction.add_mines(region.iter().copied());
    }
}
