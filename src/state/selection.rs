/// Selection controller
///
/// Tracks which tiles the user picked and whether the round has been
/// verified. Every transition is a plain method call that reports whether
/// anything changed; the UI re-derives itself from the result.

use super::data::{Round, TILE_COUNT};

/// Instruction shown above the grid
pub const PROMPT: &str = "Please click on the identical tiles to verify that you are not a robot.";

/// Result of verifying a pair of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The two tiles share an identity
    Human,
    /// The two tiles show different pictures
    NotHuman,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Human => "You are a human. Congratulations!",
            Verdict::NotHuman => {
                "We can't verify you as a human. You selected the non-identical tiles."
            }
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Human)
    }
}

/// Where the controller currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneSelected,
    TwoSelected,
    Verified(Verdict),
}

/// Picked positions (click order, at most two) plus the lock set by verify
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    picked: Vec<usize>,
    verdict: Option<Verdict>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.verdict, self.picked.len()) {
            (Some(verdict), _) => Phase::Verified(verdict),
            (None, 0) => Phase::Idle,
            (None, 1) => Phase::OneSelected,
            (None, _) => Phase::TwoSelected,
        }
    }

    /// Selected positions in click order
    pub fn positions(&self) -> &[usize] {
        &self.picked
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.picked.contains(&position)
    }

    pub fn is_locked(&self) -> bool {
        self.verdict.is_some()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Feedback text for the current state (empty until verified)
    pub fn feedback(&self) -> &'static str {
        self.verdict.map(|v| v.message()).unwrap_or_default()
    }

    /// Toggle the tile at `position`.
    ///
    /// Selects it when fewer than two are picked, deselects it when it is
    /// already picked. Ignored while locked, for a third tile, or for a
    /// position outside the grid. Returns whether the selection changed.
    pub fn click(&mut self, position: usize) -> bool {
        if self.is_locked() || position >= TILE_COUNT {
            return false;
        }

        if let Some(index) = self.picked.iter().position(|&p| p == position) {
            self.picked.remove(index);
            return true;
        }

        if self.picked.len() >= 2 {
            return false;
        }

        self.picked.push(position);
        true
    }

    /// Lock the round and compare the two picked tiles.
    ///
    /// Only acts with exactly two tiles picked and no verdict yet.
    pub fn verify(&mut self, round: &Round) -> Option<Verdict> {
        if self.is_locked() {
            return None;
        }

        let &[first, second] = self.picked.as_slice() else {
            return None;
        };

        let (a, b) = (round.tile(first)?, round.tile(second)?);
        let verdict = if first != second && a.key == b.key {
            Verdict::Human
        } else {
            Verdict::NotHuman
        };

        self.verdict = Some(verdict);
        Some(verdict)
    }

    /// Back to `Idle`. Returns false if there was nothing to clear.
    pub fn reset(&mut self) -> bool {
        if self.phase() == Phase::Idle {
            return false;
        }

        *self = Self::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{ImageKey, Tile};

    /// [img3, img1, img2, img4, img5, img3]
    fn round() -> Round {
        let keys = [
            ImageKey::Img3,
            ImageKey::Img1,
            ImageKey::Img2,
            ImageKey::Img4,
            ImageKey::Img5,
            ImageKey::Img3,
        ];
        Round::new(keys.map(|key| Tile {
            key,
            uri: format!("/tmp/{}.png", key),
        }))
    }

    #[test]
    fn test_click_walks_through_phases() {
        let mut selection = Selection::new();
        assert_eq!(selection.phase(), Phase::Idle);

        assert!(selection.click(1));
        assert_eq!(selection.phase(), Phase::OneSelected);

        assert!(selection.click(4));
        assert_eq!(selection.phase(), Phase::TwoSelected);
        assert_eq!(selection.positions(), &[1, 4]);
    }

    #[test]
    fn test_double_click_deselects() {
        let mut selection = Selection::new();

        assert!(selection.click(2));
        assert!(selection.click(2));

        assert_eq!(selection, Selection::new());
        assert_eq!(selection.phase(), Phase::Idle);
    }

    #[test]
    fn test_deselect_from_two() {
        let mut selection = Selection::new();
        selection.click(0);
        selection.click(3);

        assert!(selection.click(0));
        assert_eq!(selection.phase(), Phase::OneSelected);
        assert_eq!(selection.positions(), &[3]);
    }

    #[test]
    fn test_third_tile_is_ignored() {
        let mut selection = Selection::new();
        selection.click(0);
        selection.click(1);
        let before = selection.clone();

        assert!(!selection.click(2));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let mut selection = Selection::new();
        assert!(!selection.click(TILE_COUNT));
        assert_eq!(selection.phase(), Phase::Idle);
    }

    #[test]
    fn test_verify_needs_two_tiles() {
        let round = round();
        let mut selection = Selection::new();

        assert_eq!(selection.verify(&round), None);

        selection.click(0);
        assert_eq!(selection.verify(&round), None);
        assert!(!selection.is_locked());
    }

    #[test]
    fn test_verify_matching_pair() {
        let round = round();
        let mut selection = Selection::new();
        selection.click(5);
        selection.click(0);

        assert_eq!(selection.verify(&round), Some(Verdict::Human));
        assert_eq!(selection.phase(), Phase::Verified(Verdict::Human));
        assert_eq!(selection.feedback(), "You are a human. Congratulations!");
    }

    #[test]
    fn test_verify_mismatched_pair() {
        let round = round();
        let mut selection = Selection::new();
        selection.click(0);
        selection.click(1);

        assert_eq!(selection.verify(&round), Some(Verdict::NotHuman));
        assert_eq!(
            selection.feedback(),
            "We can't verify you as a human. You selected the non-identical tiles."
        );
    }

    #[test]
    fn test_locked_after_verify() {
        let round = round();
        let mut selection = Selection::new();
        selection.click(0);
        selection.click(5);
        selection.verify(&round);
        let locked = selection.clone();

        for position in 0..TILE_COUNT {
            assert!(!selection.click(position));
        }
        assert_eq!(selection.verify(&round), None);
        assert_eq!(selection, locked);
    }

    #[test]
    fn test_reset() {
        let round = round();
        let mut selection = Selection::new();
        assert!(!selection.reset());

        selection.click(2);
        assert!(selection.reset());
        assert_eq!(selection.phase(), Phase::Idle);

        selection.click(1);
        selection.click(2);
        assert_eq!(selection.phase(), Phase::TwoSelected);
        assert!(selection.reset());
        assert_eq!(selection.phase(), Phase::Idle);
        assert!(selection.positions().is_empty());

        selection.click(1);
        selection.click(2);
        selection.verify(&round);
        assert!(selection.reset());
        assert!(!selection.is_locked());
        assert_eq!(selection.feedback(), "");
        assert!(selection.positions().is_empty());
    }
}
