//! Property tests for the solver against random boards with known mines.
//!
//! Each case draws a mine layout and a visibility mask. Visible safe cells
//! are revealed with their true counts and visible mines are flagged, so every
//! generated position is consistent with at least one layout: the real one.

use std::collections::BTreeSet;

use mineproof_core::{BoardSize, BoardView, CellView, Coord};
use mineproof_solver::{ConstraintStore, Deduction, InferenceEngine, Technique as _, technique};
use proptest::{collection::vec, prelude::*};

#[derive(Debug, Clone)]
struct Position {
    size: BoardSize,
    mines: BTreeSet<Coord>,
    view: BoardView,
}

impl Position {
    fn build(rows: u16, cols: u16, cells: &[(bool, bool)]) -> Self {
        let size = BoardSize::new(rows, cols);
        let mines: BTreeSet<Coord> = size
            .coords()
            .zip(cells)
            .filter(|(_, (mine, _))| *mine)
            .map(|(coord, _)| coord)
            .collect();
        let views = size
            .coords()
            .zip(cells)
            .map(|(coord, &(mine, visible))| match (mine, visible) {
                (true, true) => CellView::Flagged,
                (false, true) => {
                    let count = size
                        .neighbors(coord)
                        .into_iter()
                        .filter(|n| mines.contains(n))
                        .count();
                    CellView::Revealed(u8::try_from(count).unwrap())
                }
                (_, false) => CellView::Hidden,
            })
            .collect();
        let view = BoardView::from_cells(size, views).unwrap();
        Self { size, mines, view }
    }

    fn store(&self) -> ConstraintStore {
        ConstraintStore::from_view(&self.view).unwrap()
    }

    fn assert_sound(&self, deduction: &Deduction) -> Result<(), TestCaseError> {
        for mine in deduction.mines() {
            prop_assert!(
                self.mines.contains(mine),
                "{mine} proven a mine but is safe in\n{}",
                self.view
            );
        }
        for safe in deduction.safes() {
            prop_assert!(
                !self.mines.contains(safe),
                "{safe} proven safe but is a mine in\n{}",
                self.view
            );
            prop_assert!(self.size.contains(*safe));
        }
        Ok(())
    }
}

fn arb_position() -> impl Strategy<Value = Position> {
    (2u16..9, 2u16..9).prop_flat_map(|(rows, cols)| {
        let cells = usize::from(rows) * usize::from(cols);
        vec((prop::bool::weighted(0.2), prop::bool::weighted(0.6)), cells)
            .prop_map(move |cells| Position::build(rows, cols, &cells))
    })
}

proptest! {
    /// Every technique only proves facts that hold in the true layout.
    #[test]
    fn each_technique_is_sound(position in arb_position()) {
        let constraints = position.store().constraints().unwrap();
        for technique in technique::all_techniques() {
            let deduction = technique.deduce(&constraints).unwrap();
            prop_assert_eq!(deduction.first_conflict(), None, "{}", technique.name());
            position.assert_sound(&deduction)?;
        }
    }

    /// The full engine never errors on a consistent position and stays sound.
    #[test]
    fn engine_is_sound(position in arb_position()) {
        let constraints = position.store().constraints().unwrap();
        let deduction = InferenceEngine::with_all_techniques().deduce(&constraints).unwrap();
        position.assert_sound(&deduction)?;
    }

    /// Constraint order never changes the result.
    #[test]
    fn engine_ignores_constraint_order(position in arb_position(), shift in 0usize..64, reverse: bool) {
        let engine = InferenceEngine::with_all_techniques();
        let constraints = position.store().constraints().unwrap();
        let expected = engine.deduce(&constraints).unwrap();

        let mut shuffled = constraints.clone();
        if !shuffled.is_empty() {
            let n = shift % shuffled.len();
            shuffled.rotate_left(n);
        }
        if reverse {
            shuffled.reverse();
        }
        prop_assert_eq!(engine.deduce(&shuffled).unwrap(), expected);
    }

    /// A tier runs only when every cheaper tier proved nothing, and at most one
    /// tier proves something per pass.
    #[test]
    fn engine_escalates_in_order(position in arb_position()) {
        let engine = InferenceEngine::with_all_techniques();
        let mut stats = engine.new_stats();
        let constraints = position.store().constraints().unwrap();
        let deduction = engine.deduce_with_stats(&constraints, &mut stats).unwrap();

        let attempts = stats.attempts();
        let proofs = stats.proofs();
        prop_assert_eq!(attempts[0], 1);
        for i in 1..attempts.len() {
            if attempts[i] == 1 {
                prop_assert_eq!(attempts[i - 1], 1);
                prop_assert_eq!(proofs[i - 1], 0);
            }
        }
        prop_assert!(stats.total_proofs() <= 1);
        prop_assert_eq!(stats.has_progress(), !deduction.is_empty());
    }

    /// Replaying every observation leaves the store unchanged.
    #[test]
    fn intake_is_idempotent(position in arb_position()) {
        let mut store = position.store();
        let before = store.clone();
        for (coord, cell) in position.view.iter() {
            match cell {
                CellView::Revealed(count) => {
                    prop_assert!(!store.record_revealed(coord, count).unwrap());
                }
                CellView::Flagged => {
                    prop_assert!(!store.record_flag(coord).unwrap());
                }
                CellView::Hidden | CellView::Exploded => {}
            }
        }
        prop_assert_eq!(&store, &before);
        prop_assert_eq!(store.constraints().unwrap(), before.constraints().unwrap());
    }

    /// Live constraints always satisfy `0 <= remaining <= |unknowns|` and are non-empty.
    #[test]
    fn constraints_are_well_formed(position in arb_position()) {
        for constraint in position.store().constraints().unwrap() {
            prop_assert!(!constraint.is_empty());
            prop_assert!(usize::from(constraint.remaining()) <= constraint.len());
            for &cell in constraint.unknowns() {
                prop_assert!(position.store().is_unknown(cell));
            }
        }
    }
}
