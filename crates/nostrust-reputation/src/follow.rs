// crates/nostrust-reputation/src/follow.rs
//
// Follow propagation: a depth-bounded walk that spreads trust from a scored
// identity to the identities it follows.
//
// Each followee receives `score(follower) * follow_weight / |follows|`. All
// followees at one level get their direct contribution before any of them is
// walked a level deeper. The follow graph can contain cycles; only the depth
// counter bounds the walk unless `follow_visit_once` is switched on.

use std::collections::HashSet;

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info};

use nostrust_core::{EngineConfig, Identity, NostrustError, SocialGraphSource};

use crate::fetch::{fetch_or_empty, Relation};
use crate::ledger::Ledger;

/// Spread trust from `identity` through its follows, `depth` hops deep.
///
/// Does nothing when follows are disabled or `depth` is zero. A failure to
/// fetch `identity`'s own follow set is fatal, since the whole walk hangs off
/// it; failures further down degrade to "follows nobody".
pub async fn propagate_follows<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &mut Ledger,
    identity: &Identity,
    depth: u32,
) -> Result<(), NostrustError> {
    if !config.follow_enable || depth < 1 {
        return Ok(());
    }

    info!(%identity, depth, "propagating trust through follows");
    let follows = source
        .get_follows(identity)
        .await
        .map_err(|e| NostrustError::SeedUnreachable {
            identity: identity.to_npub(),
            reason: e.to_string(),
        })?;

    let mut visited = HashSet::new();
    visited.insert(*identity);

    credit_followees(config, ledger, identity, &follows);
    for followee in &follows {
        walk(source, config, ledger, *followee, depth - 1, &mut visited).await;
    }

    debug!(scored = ledger.len(), "follow propagation finished");
    Ok(())
}

/// One level below the root: fetch, credit, recurse.
fn walk<'a, S: SocialGraphSource + ?Sized>(
    source: &'a S,
    config: &'a EngineConfig,
    ledger: &'a mut Ledger,
    identity: Identity,
    depth: u32,
    visited: &'a mut HashSet<Identity>,
) -> BoxFuture<'a, ()> {
    async move {
        if depth < 1 {
            return;
        }
        if config.follow_visit_once && !visited.insert(identity) {
            return;
        }

        let follows = fetch_or_empty(source, Relation::Follows, &identity).await;
        credit_followees(config, ledger, &identity, &follows);
        for followee in &follows {
            walk(source, config, &mut *ledger, *followee, depth - 1, &mut *visited).await;
        }
    }
    .boxed()
}

/// Give every followee its direct share of `follower`'s current score.
///
/// The follower's score is re-read for each followee, so a follower listed in
/// its own follow set sees its updated score for the remaining followees.
fn credit_followees(config: &EngineConfig, ledger: &mut Ledger, follower: &Identity, follows: &[Identity]) {
    let k = follows.len() as f64;
    for followee in follows {
        let contribution = ledger.score(follower) * config.follow_weight / k;
        ledger.apply_contribution(*followee, contribution, config.minimum_trust_score);
    }
}
