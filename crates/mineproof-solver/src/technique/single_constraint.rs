use super::BoxedTechnique;
use crate::{Constraint, Deduction, SolverError, technique::Technique};

const NAME: &str = "single constraint";

/// A technique that resolves constraints on their own.
///
/// A constraint with no mines left clears all of its unknown cells, and a
/// constraint with as many mines left as unknown cells mines all of them.
/// This is the cheapest tier and is always tried first.
///
/// # Examples
///
/// ```
/// use mineproof_core::Coord;
/// use mineproof_solver::{
///     Constraint,
///     technique::{SingleConstraint, Technique},
/// };
///
/// let constraints = [Constraint::new(
///     Coord::new(0, 0),
///     0,
///     [Coord::new(0, 1), Coord::new(1, 1)],
/// )?];
/// let deduction = SingleConstraint::new().deduce(&constraints)?;
/// assert_eq!(deduction.safes().len(), 2);
/// # Ok::<(), mineproof_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleConstraint;

impl SingleConstraint {
    /// Creates a new `SingleConstraint` technique.
    #[must_use]
    pub const fn new() -> Self {
        SingleConstraint
    }
}

impl Technique for SingleConstraint {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn deduce(&self, constraints: &[Constraint]) -> Result<Deduction, SolverError> {
        let mut deduction = Deduction::new();
        for constraint in constraints {
            if constraint.remaining() == 0 {
                deduction.add_safes(constraint.unknowns().iter().copied());
            } else if usize::from(constraint.remaining()) == constraint.len() {
                deduction.add_mines(constraint.unknowns().iter().copied());
            }
        }
        Ok(deduction)
    }
}
