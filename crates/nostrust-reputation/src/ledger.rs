// crates/nostrust-reputation/src/ledger.rs
//
// Trust ledger: identity -> signed trust score, plus the pass-local side
// tables that distrust and boost passes stage their adjustments in.
//
// Both keep first-insertion order so every pass walks identities in a
// deterministic sequence. Absence from the ledger means "no opinion", which
// is distinct from a score of zero.

use std::collections::HashMap;

use nostrust_core::Identity;

/// Highest score any identity can hold.
pub const MAX_TRUST: f64 = 1.0;

/// Score the seed identity starts with.
pub const SEED_TRUST: f64 = 1.0;

/// Insertion-ordered identity -> score map shared by `Ledger` and `SideTable`.
#[derive(Debug, Clone, Default, PartialEq)]
struct ScoreMap {
    entries: Vec<(Identity, f64)>,
    index: HashMap<Identity, usize>,
}

impl ScoreMap {
    fn get(&self, identity: &Identity) -> Option<f64> {
        self.index.get(identity).map(|&i| self.entries[i].1)
    }

    /// Set a value, keeping the original position if the key already exists.
    fn set(&mut self, identity: Identity, value: f64) {
        match self.index.get(&identity) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(identity, self.entries.len());
                self.entries.push((identity, value));
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> impl Iterator<Item = (Identity, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// The identity -> trust score mapping under construction for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    scores: ScoreMap,
}

impl Ledger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding only `seed` at full trust.
    pub fn seeded(seed: Identity) -> Self {
        let mut ledger = Self::new();
        ledger.set(seed, SEED_TRUST);
        ledger
    }

    /// Stored score, or `None` if the identity has no score.
    pub fn get(&self, identity: &Identity) -> Option<f64> {
        self.scores.get(identity)
    }

    /// Stored score, reading an absent identity as `0.0`.
    pub fn score(&self, identity: &Identity) -> f64 {
        self.get(identity).unwrap_or(0.0)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.scores.index.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.len() == 0
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Identity, f64)> + '_ {
        self.scores.iter()
    }

    /// Overwrite a score. No threshold or ceiling is applied.
    pub fn set(&mut self, identity: Identity, score: f64) {
        self.scores.set(identity, score);
    }

    /// Apply a positive follow contribution under the floor/ceiling rules.
    ///
    /// The result is stored (capped at [`MAX_TRUST`]) only if it reaches
    /// `minimum`; otherwise the stored score, present or not, is untouched.
    /// Returns whether the ledger changed.
    pub fn apply_contribution(&mut self, identity: Identity, contribution: f64, minimum: f64) -> bool {
        let candidate = self.score(&identity) + contribution;
        if candidate >= minimum {
            self.set(identity, candidate.min(MAX_TRUST));
            true
        } else {
            false
        }
    }

    /// Add every side-table adjustment to the ledger in one step.
    ///
    /// Identities without a score are inserted at the adjustment value.
    /// Scores are not floored; a boost that would pass [`MAX_TRUST`] is capped.
    pub fn merge(&mut self, side: SideTable) {
        for (identity, delta) in side.scores.entries {
            let merged = self.score(&identity) + delta;
            self.set(identity, merged.min(MAX_TRUST));
        }
    }

    /// Copy out the scores of `identities`, inserting `0.0` for any the
    /// ledger has no opinion on.
    pub fn subset<'a>(&self, identities: impl IntoIterator<Item = &'a Identity>) -> Ledger {
        let mut subset = Ledger::new();
        for identity in identities {
            subset.set(*identity, self.score(identity));
        }
        subset
    }
}

impl FromIterator<(Identity, f64)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (Identity, f64)>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        for (identity, score) in iter {
            ledger.set(identity, score);
        }
        ledger
    }
}

/// Pass-local staging map of adjustments keyed by target identity.
///
/// A later adjustment for the same target replaces the earlier one; nothing
/// accumulates until the table is merged into the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideTable {
    scores: ScoreMap,
}

impl SideTable {
    /// Create a new empty side table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an adjustment, replacing any earlier one for `identity`.
    pub fn set(&mut self, identity: Identity, adjustment: f64) {
        self.scores.set(identity, adjustment);
    }

    pub fn get(&self, identity: &Identity) -> Option<f64> {
        self.scores.get(identity)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Identity, f64)> + '_ {
        self.scores.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> Identity {
        Identity::from_bytes([n; 32])
    }

    #[test]
    fn seeded_ledger_holds_seed_at_one() {
        let ledger = Ledger::seeded(id(1));
        assert_eq!(ledger.get(&id(1)), Some(1.0));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&id(2)), None);
        assert_eq!(ledger.score(&id(2)), 0.0);
    }

    #[test]
    fn sub_threshold_contribution_is_discarded() {
        let mut ledger = Ledger::new();
        assert!(!ledger.apply_contribution(id(1), 0.0000019, 0.000002));
        assert!(!ledger.contains(&id(1)));

        ledger.set(id(2), -0.5);
        assert!(!ledger.apply_contribution(id(2), 0.1, 0.000002));
        assert_eq!(ledger.get(&id(2)), Some(-0.5));
    }

    #[test]
    fn contribution_at_threshold_is_applied() {
        let mut ledger = Ledger::new();
        assert!(ledger.apply_contribution(id(1), 0.000002, 0.000002));
        assert_eq!(ledger.get(&id(1)), Some(0.000002));
    }

    #[test]
    fn contribution_is_capped_at_one() {
        let mut ledger = Ledger::new();
        ledger.set(id(1), 0.9);
        ledger.apply_contribution(id(1), 0.5, 0.000002);
        assert_eq!(ledger.get(&id(1)), Some(1.0));
    }

    #[test]
    fn side_table_overwrites() {
        let mut side = SideTable::new();
        side.set(id(9), -0.5);
        side.set(id(9), -0.3);
        assert_eq!(side.len(), 1);
        assert_eq!(side.get(&id(9)), Some(-0.3));
    }

    #[test]
    fn merge_adds_and_inserts() {
        let mut ledger = Ledger::new();
        ledger.set(id(1), 0.4);
        let mut side = SideTable::new();
        side.set(id(1), -0.1);
        side.set(id(2), -0.5);
        ledger.merge(side);
        assert!((ledger.score(&id(1)) - 0.3).abs() < 1e-12);
        assert_eq!(ledger.get(&id(2)), Some(-0.5));
    }

    #[test]
    fn negative_scores_are_not_floored() {
        let mut ledger = Ledger::new();
        ledger.set(id(1), -3.0);
        let mut side = SideTable::new();
        side.set(id(1), -2.0);
        ledger.merge(side);
        assert_eq!(ledger.get(&id(1)), Some(-5.0));
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let mut ledger = Ledger::new();
        ledger.set(id(3), 0.1);
        ledger.set(id(1), 0.2);
        ledger.set(id(3), 0.5);
        let order: Vec<Identity> = ledger.iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![id(3), id(1)]);
    }

    #[test]
    fn subset_fills_missing_with_zero() {
        let mut ledger = Ledger::seeded(id(1));
        ledger.set(id(2), 0.25);
        let subset = ledger.subset(&[id(2), id(7)]);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.get(&id(2)), Some(0.25));
        assert_eq!(subset.get(&id(7)), Some(0.0));
        assert!(!subset.contains(&id(1)));
    }
}
