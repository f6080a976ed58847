use super::catalog::Catalog;
use super::data::Round;
use super::round::{generate_round, RandomSource, SystemRandom};
use super::selection::{Selection, Verdict};

/// One widget instance: owns its catalog, the current round, the
/// selection and the random source used to deal new rounds.
pub struct Challenge {
    catalog: Catalog,
    round: Round,
    selection: Selection,
    random: Box<dyn RandomSource + Send>,
}

impl Challenge {
    /// Create a challenge and deal its first round
    pub fn new(catalog: Catalog) -> Self {
        Self::with_random(catalog, Box::new(SystemRandom::from_env()))
    }

    pub fn with_random(catalog: Catalog, mut random: Box<dyn RandomSource + Send>) -> Self {
        let round = generate_round(&catalog, random.as_mut());
        Self {
            catalog,
            round,
            selection: Selection::new(),
            random,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn click(&mut self, position: usize) -> bool {
        let changed = self.selection.click(position);
        if changed {
            tracing::debug!(
                position,
                selected = ?self.selection.positions(),
                "selection changed"
            );
        }
        changed
    }

    pub fn verify(&mut self) -> Option<Verdict> {
        let verdict = self.selection.verify(&self.round)?;
        tracing::info!(
            positions = ?self.selection.positions(),
            passed = verdict.passed(),
            "verified selection"
        );
        Some(verdict)
    }

    /// Clear the selection and deal a fresh round.
    ///
    /// Does nothing when the widget is already idle with no feedback.
    pub fn reset(&mut self) -> bool {
        if !self.selection.reset() {
            return false;
        }
        self.deal();
        true
    }

    fn deal(&mut self) {
        self.round = generate_round(&self.catalog, self.random.as_mut());
        tracing::info!(keys = ?self.round.keys(), "new round");
        tracing::debug!(pair = ?self.round.matching_pair(), "matching tiles");
    }
}

impl std::fmt::Debug for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Challenge")
            .field("round", &self.round)
            .field("selection", &self.selection)
            .finish()
    }
}
