// crates/nostrust-reputation/src/boost.rs
//
// Repost boost: well-trusted identities lend a small fraction of their score
// to the authors they repost. Same two-phase side table as the distrust
// passes, so repeated reposts of one author do not stack.

use tracing::{debug, info};

use nostrust_core::{EngineConfig, SocialGraphSource};

use crate::distrust::sources_above;
use crate::fetch::{fetch_many, Relation};
use crate::ledger::{Ledger, SideTable};

/// Stage repost boosts without touching the ledger.
///
/// Only identities scoring above `100 * minimum_trust_score` count. Each
/// reposted author gets `score(reposter) * repost_weight`; the last reposter
/// in ledger order wins.
pub async fn compute_repost_boost<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &Ledger,
) -> SideTable {
    let mut side = SideTable::new();
    if !config.reposts_enable {
        return side;
    }

    let (reposters, scores) = sources_above(ledger, config.repost_eligibility_threshold());
    let repost_lists = fetch_many(source, Relation::Reposts, &reposters, config.fetch_concurrency).await;

    for (score, reposted) in scores.into_iter().zip(repost_lists) {
        for author in reposted {
            side.set(author, score * config.repost_weight);
        }
    }
    side
}

/// Apply repost boosts to the ledger. No-op when reposts are disabled.
pub async fn apply_repost_boost<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &mut Ledger,
) {
    if !config.reposts_enable {
        return;
    }
    info!("Going through reposts. This can take a while.");
    let side = compute_repost_boost(source, config, ledger).await;
    debug!(ledger = ledger.len(), staged = side.len(), "repost pass staged");
    ledger.merge(side);
}
