// crates/nostrust-core/src/memory.rs
//
// In-memory social graph implementing `SocialGraphSource` and `NameResolver`.
//
// Used for offline runs and tests. Relations are stored as declared lists so
// duplicates and ordering survive exactly as inserted. Identities can be
// marked unreachable to exercise the engine's degradation paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::NostrustError;
use crate::identity::Identity;
use crate::traits::{NameResolver, SocialGraphSource};

/// A social graph held entirely in memory.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryGraph {
    #[serde(default)]
    follows: HashMap<Identity, Vec<Identity>>,
    #[serde(default)]
    mutes: HashMap<Identity, Vec<Identity>>,
    #[serde(default)]
    reports: HashMap<Identity, Vec<Identity>>,
    #[serde(default)]
    reposts: HashMap<Identity, Vec<Identity>>,
    #[serde(default)]
    names: HashMap<Identity, String>,
    /// Identities whose lookups fail with a network error.
    #[serde(default)]
    unreachable: HashSet<Identity>,
    /// Number of lookups served, successful or not.
    #[serde(skip)]
    lookups: AtomicUsize,
}

impl MemoryGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `who`'s follow list, replacing any previous one.
    pub fn with_follows(mut self, who: Identity, follows: impl IntoIterator<Item = Identity>) -> Self {
        self.follows.insert(who, follows.into_iter().collect());
        self
    }

    /// Declare `who`'s mute list, replacing any previous one.
    pub fn with_mutes(mut self, who: Identity, mutes: impl IntoIterator<Item = Identity>) -> Self {
        self.mutes.insert(who, mutes.into_iter().collect());
        self
    }

    /// Declare the identities `who` has reported.
    pub fn with_reports(mut self, who: Identity, reported: impl IntoIterator<Item = Identity>) -> Self {
        self.reports.insert(who, reported.into_iter().collect());
        self
    }

    /// Declare the authors `who` has reposted, duplicates included.
    pub fn with_reposts(mut self, who: Identity, reposted: impl IntoIterator<Item = Identity>) -> Self {
        self.reposts.insert(who, reposted.into_iter().collect());
        self
    }

    /// Give `who` a display name.
    pub fn with_name(mut self, who: Identity, name: impl Into<String>) -> Self {
        self.names.insert(who, name.into());
        self
    }

    /// Make every lookup about `who` fail.
    pub fn with_unreachable(mut self, who: Identity) -> Self {
        self.unreachable.insert(who);
        self
    }

    /// Total lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn fetch(
        &self,
        relation: &HashMap<Identity, Vec<Identity>>,
        identity: &Identity,
    ) -> Result<Vec<Identity>, NostrustError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if self.unreachable.contains(identity) {
            return Err(NostrustError::Network(format!(
                "{} is unreachable",
                identity.to_npub()
            )));
        }
        Ok(relation.get(identity).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl SocialGraphSource for MemoryGraph {
    async fn get_follows(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        self.fetch(&self.follows, identity)
    }

    async fn get_mutes(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        self.fetch(&self.mutes, identity)
    }

    async fn get_reported_by(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if self.unreachable.contains(identity) {
            return Err(NostrustError::Network(format!(
                "{} is unreachable",
                identity.to_npub()
            )));
        }
        let mut reporters: Vec<Identity> = self
            .reports
            .iter()
            .filter(|(_, targets)| targets.contains(identity))
            .map(|(reporter, _)| *reporter)
            .collect();
        reporters.sort();
        Ok(reporters)
    }

    async fn get_reports(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        self.fetch(&self.reports, identity)
    }

    async fn get_reposts(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        self.fetch(&self.reposts, identity)
    }
}

#[async_trait]
impl NameResolver for MemoryGraph {
    async fn display_name(&self, identity: &Identity) -> String {
        self.names
            .get(identity)
            .cloned()
            .unwrap_or_else(|| identity.to_npub())
    }
}
