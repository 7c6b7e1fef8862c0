// crates/nostrust-reputation/src/ranker.rs
//
// Ranking and report rendering for a ledger or any subset of one.

use std::fmt::Write as _;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use nostrust_core::{Identity, NameResolver};

use crate::ledger::Ledger;

/// One line of a ranked trust report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// The scored identity (hex).
    pub identity: Identity,
    /// Canonical textual form of the identity.
    pub npub: String,
    /// Final trust score.
    pub score: f64,
    /// Display name, once resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl RankedEntry {
    /// Name to print: the resolved display name, or the npub.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.npub)
    }
}

/// Order every ledger entry by score, highest first.
///
/// Equal scores are ordered by identity bytes so the output is stable across
/// runs.
pub fn rank(ledger: &Ledger) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = ledger
        .iter()
        .map(|(identity, score)| RankedEntry {
            identity,
            npub: identity.to_npub(),
            score,
            display_name: None,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.identity.cmp(&b.identity))
    });
    entries
}

/// Fill in display names, keeping at most `concurrency` lookups in flight.
pub async fn resolve_names<R: NameResolver + ?Sized>(
    entries: &mut [RankedEntry],
    resolver: &R,
    concurrency: usize,
) {
    let names: Vec<String> = stream::iter(entries.iter().map(|e| resolver.display_name(&e.identity)))
        .buffered(concurrency.max(1))
        .collect()
        .await;
    for (entry, name) in entries.iter_mut().zip(names) {
        entry.display_name = Some(name);
    }
}

/// One report line: `npub  score  name`, score to ten decimals.
pub fn format_entry(entry: &RankedEntry) -> String {
    format!("{}  {:.10}  {}", entry.npub, entry.score, entry.label())
}

/// Render a ranked report under a header naming the trust floor in use.
pub fn format_report(entries: &[RankedEntry], minimum_trust_score: f64) -> String {
    let mut out = format!(
        "All trust ratings, sorted from most trusted to least trusted above threshold {}:\n",
        minimum_trust_score
    );
    for entry in entries {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", format_entry(entry));
    }
    out
}
