use super::{BoxedTechnique, Conflict, overlapping_pairs};
use crate::{Constraint, Deduction, SolverError, technique::Technique};

const NAME: &str = "subset difference";

/// A technique that compares a constraint with every constraint containing it.
///
/// When the unknowns of `A` are a strict subset of the unknowns of `B`, the
/// difference `D = B - A` holds exactly `B.remaining - A.remaining` mines.
/// If that equals `|D|`, every cell of `D` is a mine; if it is zero, every
/// cell of `D` is safe. A difference that is negative or larger than `|D|`
/// means the pair cannot both hold, which is an error.
///
/// # Examples
///
/// ```
/// use mineproof_core::Coord;
/// use mineproof_solver::{
///     Constraint,
///     technique::{SubsetDifference, Technique},
/// };
///
/// let a = Constraint::new(Coord::new(1, 0), 1, [Coord::new(0, 0), Coord::new(0, 1)])?;
/// let b = Constraint::new(
///     Coord::new(1, 1),
///     1,
///     [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
/// )?;
/// let deduction = SubsetDifference::new().deduce(&[a, b])?;
/// assert!(deduction.safes().contains(&Coord::new(0, 2)));
/// # Ok::<(), mineproof_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SubsetDifference;

impl SubsetDifference {
    /// Creates a new `SubsetDifference` technique.
    #[must_use]
    pub const fn new() -> Self {
        SubsetDifference
    }
}

impl Technique for SubsetDifference {
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
            for (inner, outer) in [(a, b), (b, a)] {
                if inner.is_strict_subset_of(outer)
                    && !apply_subset(inner, outer, &mut deduction)
                {
                    conflict.record(inner, outer);
                }
            }
        }
        conflict.into_result(deduction)
    }
}

/// Returns `false` if `outer` cannot hold given `inner`.
fn apply_subset(inner: &Constraint, outer: &Constraint, deduction: &mut Deduction) -> bool {
    let diff = outer.unknowns().difference(inner.unknowns());
    let diff_len = outer.len() - inner.len();
    let Some(diff_mines) = outer.remaining().checked_sub(inner.remaining()) else {
        return false;
    };
    let diff_mines = usize::from(diff_mines);

    if diff_mines == 0 {
        deduction.add_safes(diff.copied());
    } else if diff_mines == diff_len {
        deduction.add_mines(diff.copied());
    }
    diff_mines <= diff_len
}
