use crate::{
    Constraint, Deduction, SolverError,
    technique::{self, BoxedTechnique},
};

/// Statistics collected across inference passes.
///
/// Counts are indexed in engine order, so `attempts()[i]` and `proofs()[i]`
/// belong to `engine.techniques()[i]`.
///
/// # Examples
///
/// ```
/// use mineproof_solver::{ConstraintStore, InferenceEngine};
/// use mineproof_core::BoardView;
///
/// let view: BoardView = "
///     _ _ _
///     1 2 F
/// "
/// .parse()?;
/// let store = ConstraintStore::from_view(&view)?;
///
/// let engine = InferenceEngine::with_all_techniques();
/// let mut stats = engine.new_stats();
/// let deduction = engine.deduce_with_stats(&store.constraints()?, &mut stats)?;
///
/// assert!(!deduction.is_empty());
/// // Tier 1 was tried and failed, Tier 2 proved the safe cell, Tier 3 never ran.
/// assert_eq!(stats.attempts(), [1, 1, 0]);
/// assert_eq!(stats.proofs(), [0, 1, 0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineStats {
    attempts: Vec<usize>,
    proofs: Vec<usize>,
}

impl EngineStats {
    /// Returns how many times each technique was run, in engine order.
    #[must_use]
    pub fn attempts(&self) -> &[usize] {
        &self.attempts
    }

    /// Returns how many times each technique proved something, in engine order.
    #[must_use]
    pub fn proofs(&self) -> &[usize] {
        &self.proofs
    }

    /// Returns the total number of passes that proved something.
    #[must_use]
    pub fn total_proofs(&self) -> usize {
        self.proofs.iter().sum()
    }

    /// Returns `true` if any technique proved something at least once.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_proofs() > 0
    }
}

/// Runs inference techniques in escalation order.
///
/// A pass tries each technique in turn and stops at the first one that proves
/// anything; later, more expensive techniques only run when every earlier one
/// came back empty. The result is everything that one technique proves, so it
/// is independent of constraint order.
///
/// An empty [`Deduction`] is not an error: it means the position needs a guess.
///
/// # Examples
///
/// ```
/// use mineproof_core::{BoardView, Coord};
/// use mineproof_solver::{ConstraintStore, InferenceEngine};
///
/// let view: BoardView = "
///     _ 1
///     1 1
/// "
/// .parse()?;
/// let store = ConstraintStore::from_view(&view)?;
///
/// let engine = InferenceEngine::with_all_techniques();
/// let deduction = engine.deduce(&store.constraints()?)?;
/// assert!(deduction.mines().contains(&Coord::new(0, 0)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    techniques: Vec<BoxedTechnique>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::with_all_techniques()
    }
}

impl InferenceEngine {
    /// Creates an engine that tries `techniques` in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mineproof_solver::{InferenceEngine, technique};
    ///
    /// let engine = InferenceEngine::new(technique::fundamental_techniques());
    /// assert_eq!(engine.techniques().len(), 1);
    /// ```
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self { techniques }
    }

    /// Creates an engine with every technique, cheapest first.
    ///
    /// See [`technique::all_techniques`].
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self::new(technique::all_techniques())
    }

    /// Returns the configured techniques in escalation order.
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Creates a statistics object aligned with this engine's technique order.
    #[must_use]
    pub fn new_stats(&self) -> EngineStats {
        EngineStats {
            attempts: vec![0; self.techniques.len()],
            proofs: vec![0; self.techniques.len()],
        }
    }

    /// Runs one inference pass over `constraints`.
    ///
    /// # Errors
    ///
    /// - [`SolverError::Contradiction`] if a technique proves a cell both mine
    ///   and safe.
    /// - [`SolverError::InconsistentPair`] if two constraints cannot both hold.
    pub fn deduce(&self, constraints: &[Constraint]) -> Result<Deduction, SolverError> {
        let mut stats = self.new_stats();
        self.deduce_with_stats(constraints, &mut stats)
    }

    /// Runs one inference pass, recording which techniques ran and which proved
    /// something into `stats`.
    ///
    /// # Errors
    ///
    /// - [`SolverError::Contradiction`] if a technique proves a cell both mine
    ///   and safe.
    /// - [`SolverError::InconsistentPair`] if two constraints cannot both hold.
    pub fn deduce_with_stats(
        &self,
        constraints: &[Constraint],
        stats: &mut EngineStats,
    ) -> Result<Deduction, SolverError> {
        debug_assert_eq!(self.techniques.len(), stats.attempts.len());

        for (i, technique) in self.techniques.iter().enumerate() {
            stats.attempts[i] += 1;
            let deduction = technique.deduce(constraints)?;
            if let Some(coord) = deduction.first_conflict() {
                let constraints = constraints
                    .iter()
                    .filter(|c| c.contains(coord))
                    .cloned()
                    .collect();
                return Err(SolverError::Contradiction {
                    coord,
                    constraints,
                });
            }
            if !deduction.is_empty() {
                stats.proofs[i] += 1;
                log::debug!(
                    "{} proved {} mines and {} safe cells",
                    technique.name(),
                    deduction.mines().len(),
                    deduction.safes().len()
                );
                return Ok(deduction);
            }
        }
        Ok(Deduction::new())
    }
}
