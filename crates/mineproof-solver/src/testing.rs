//! Test utilities for technique implementations.
//!
//! [`ConstraintTester`] runs a technique over a set of constraints and checks
//! what it proved, or that it rejected the input. Every run also replays the
//! technique on reordered input and asserts the result does not depend on
//! constraint order.

use std::collections::BTreeSet;

use mineproof_core::{BoardView, Coord};

use crate::{Constraint, ConstraintStore, Deduction, SolverError, technique::Technique};

/// A test harness for verifying technique implementations.
///
/// All methods return `self`, enabling fluent method chaining. Assertion
/// methods panic with detailed messages on failure and use `#[track_caller]`
/// to report the caller's location.
#[derive(Debug)]
pub struct ConstraintTester {
    constraints: Vec<Constraint>,
    outcome: Option<Result<Deduction, SolverError>>,
}

impl ConstraintTester {
    /// Creates a tester from explicit constraints.
    pub fn new<I>(constraints: I) -> Self
    where
        I: IntoIterator<Item = Constraint>,
    {
        Self {
            constraints: constraints.into_iter().collect(),
            outcome: None,
        }
    }

    /// Creates a tester from a board string in [`BoardView`] format.
    ///
    /// # Panics
    ///
    /// Panics if the board cannot be parsed or holds an impossible count.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        let view: BoardView = s.parse().unwrap();
        let store = ConstraintStore::from_view(&view).unwrap();
        Self::new(store.constraints().unwrap())
    }

    /// Runs the technique once and records its deduction or error.
    ///
    /// # Panics
    ///
    /// Panics if reversing or rotating the constraints changes the result.
    #[track_caller]
    pub fn apply<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        let outcome = technique.deduce(&self.constraints);

        let mut reversed = self.constraints.clone();
        reversed.reverse();
        assert_eq!(
            technique.deduce(&reversed),
            outcome,
            "Expected {} to ignore constraint order (reversed)",
            technique.name()
        );
        if !self.constraints.is_empty() {
            let mut rotated = self.constraints.clone();
            rotated.rotate_left(1);
            assert_eq!(
                technique.deduce(&rotated),
                outcome,
                "Expected {} to ignore constraint order (rotated)",
                technique.name()
            );
        }

        self.outcome = Some(outcome);
        self
    }

    #[track_caller]
    fn outcome(&self) -> &Result<Deduction, SolverError> {
        self.outcome
            .as_ref()
            .expect("apply a technique before inspecting its deduction")
    }

    /// Returns the recorded deduction.
    ///
    /// # Panics
    ///
    /// Panics if no technique has been applied yet, or if it failed.
    #[track_caller]
    pub fn deduction(&self) -> &Deduction {
        match self.outcome() {
            Ok(deduction) => deduction,
            Err(err) => panic!("Expected a deduction, but the technique failed: {err}"),
        }
    }

    /// Asserts that the technique rejected `first` and `second` as a pair.
    #[track_caller]
    pub fn assert_inconsistent(self, first: &Constraint, second: &Constraint) -> Self {
        let expected = SolverError::InconsistentPair {
            first: first.clone(),
            second: second.clone(),
        };
        match self.outcome() {
            Err(err) => assert_eq!(err, &expected, "Expected {first:?} and {second:?} to conflict"),
            Ok(deduction) => panic!("Expected an inconsistent pair, but got {deduction:?}"),
        }
        self
    }

    /// Asserts that every given cell was proven a mine.
    #[track_caller]
    pub fn assert_mine_includes<C>(self, coords: C) -> Self
    where
        C: IntoIterator<Item = Coord>,
    {
        let expected: BTreeSet<Coord> = coords.into_iter().collect();
        let mines = self.deduction().mines();
        let missing: Vec<_> = expected.difference(mines).collect();
        assert!(
            missing.is_empty(),
            "Expected {missing:?} to be proven mines, but mines are {mines:?}"
        );
        self
    }

    /// Asserts that exactly the given cells were proven mines.
    #[track_caller]
    pub fn assert_mines_exact<C>(self, coords: C) -> Self
    where
        C: IntoIterator<Item = Coord>,
    {
        let expected: BTreeSet<Coord> = coords.into_iter().collect();
        assert_eq!(
            self.deduction().mines(),
            &expected,
            "Expected exactly {expected:?} to be proven mines"
        );
        self
    }

    /// Asserts that no mine was proven.
    #[track_caller]
    pub fn assert_no_mines(self) -> Self {
        let mines = self.deduction().mines();
        assert!(mines.is_empty(), "Expected no mines, but found {mines:?}");
        self
    }

    /// Asserts that every given cell was proven safe.
    #[track_caller]
    pub fn assert_safe_includes<C>(self, coords: C) -> Self
    where
        C: IntoIterator<Item = Coord>,
    {
        let expected: BTreeSet<Coord> = coords.into_iter().collect();
        let safes = self.deduction().safes();
        let missing: Vec<_> = expected.difference(safes).collect();
        assert!(
            missing.is_empty(),
            "Expected {missing:?} to be proven safe, but safes are {safes:?}"
        );
        self
    }

    /// Asserts that exactly the given cells were proven safe.
    #[track_caller]
    pub fn assert_safes_exact<C>(self, coords: C) -> Self
    where
        C: IntoIterator<Item = Coord>,
    {
        let expected: BTreeSet<Coord> = coords.into_iter().collect();
        assert_eq!(
            self.deduction().safes(),
            &expected,
            "Expected exactly {expected:?} to be proven safe"
        );
        self
    }

    /// Asserts that no safe cell was proven.
    #[track_caller]
    pub fn assert_no_safes(self) -> Self {
        let safes = self.deduction().safes();
        assert!(safes.is_empty(), "Expected no safe cells, but found {safes:?}");
        self
    }

    /// Asserts that the technique proved nothing at all.
    #[track_caller]
    pub fn assert_nothing_proven(self) -> Self {
        let deduction = self.deduction();
        assert!(
            deduction.is_empty(),
            "Expected nothing to be proven, but got {deduction:?}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxedTechnique, technique::SingleConstraint};

    #[derive(Debug)]
    struct FirstOnly;

    impl Technique for FirstOnly {
        fn name(&self) -> &'static str {
            "first only"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(FirstOnly)
        }

        fn deduce(&self, constraints: &[Constraint]) -> Result<Deduction, SolverError> {
            let mut deduction = Deduction::new();
            if let Some(first) = constraints.first() {
                deduction.add_safes(first.unknowns().iter().copied());
            }
            Ok(deduction)
        }
    }

    #[test]
    fn test_assertions_pass_on_matching_deduction() {
        ConstraintTester::from_str(
            "
            0 _
            _ _
        ",
        )
        .apply(&SingleConstraint::new())
        .assert_safes_exact([Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)])
        .assert_safe_includes([Coord::new(1, 1)])
        .assert_no_mines()
        .assert_mine_includes([]);
    }

    #[test]
    #[should_panic(expected = "ignore constraint order")]
    fn test_order_dependent_technique_is_rejected() {
        ConstraintTester::from_str(
            "
            0 _ _ 1
            _ _ _ _
        ",
        )
        .apply(&FirstOnly);
    }

    #[test]
    #[should_panic(expected = "technique failed")]
    fn test_deduction_panics_on_error() {
        let a = Constraint::new(Coord::new(1, 0), 2, [Coord::new(0, 0), Coord::new(0, 1)]).unwrap();
        let b = Constraint::new(
            Coord::new(1, 1),
            1,
            [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
        )
        .unwrap();
        ConstraintTester::new([a, b])
            .apply(&crate::technique::SubsetDifference::new())
            .assert_no_mines();
    }

    #[test]
    #[should_panic(expected = "apply a technique")]
    fn test_deduction_requires_apply() {
        let _ = ConstraintTester::new([]).deduction();
    }
}
