// crates/nostrust-reputation/src/fetch.rs
//
// Degrading lookups: a failed fetch is logged and read as an empty set so one
// unreachable identity never aborts a pass.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use nostrust_core::{Identity, SocialGraphSource};

/// Which relation of the social graph to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relation {
    Follows,
    Mutes,
    Reports,
    ReportedBy,
    Reposts,
}

impl Relation {
    fn label(self) -> &'static str {
        match self {
            Relation::Follows => "follows",
            Relation::Mutes => "mutes",
            Relation::Reports => "reports",
            Relation::ReportedBy => "reported-by",
            Relation::Reposts => "reposts",
        }
    }
}

/// Fetch one relation, reading any failure as "no data".
pub(crate) async fn fetch_or_empty<S: SocialGraphSource + ?Sized>(
    source: &S,
    relation: Relation,
    identity: &Identity,
) -> Vec<Identity> {
    let result = match relation {
        Relation::Follows => source.get_follows(identity).await,
        Relation::Mutes => source.get_mutes(identity).await,
        Relation::Reports => source.get_reports(identity).await,
        Relation::ReportedBy => source.get_reported_by(identity).await,
        Relation::Reposts => source.get_reposts(identity).await,
    };
    match result {
        Ok(set) => {
            debug!(relation = relation.label(), %identity, count = set.len(), "fetched");
            set
        }
        Err(e) => {
            warn!(
                relation = relation.label(),
                %identity,
                "lookup failed, treating as empty: {}",
                e
            );
            Vec::new()
        }
    }
}

/// Fetch one relation for many identities with at most `concurrency`
/// lookups in flight. Results come back in the order of `identities`.
pub(crate) async fn fetch_many<S: SocialGraphSource + ?Sized>(
    source: &S,
    relation: Relation,
    identities: &[Identity],
    concurrency: usize,
) -> Vec<Vec<Identity>> {
    stream::iter(identities.iter().map(|id| fetch_or_empty(source, relation, id)))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostrust_core::MemoryGraph;

    fn id(n: u8) -> Identity {
        Identity::from_bytes([n; 32])
    }

    #[tokio::test]
    async fn failures_degrade_to_empty() {
        let graph = MemoryGraph::new()
            .with_mutes(id(1), [id(5)])
            .with_mutes(id(2), [id(6)])
            .with_unreachable(id(2));
        let sets = fetch_many(&graph, Relation::Mutes, &[id(1), id(2)], 4).await;
        assert_eq!(sets, vec![vec![id(5)], vec![]]);
    }

    #[tokio::test]
    async fn results_keep_input_order() {
        let graph = MemoryGraph::new()
            .with_reposts(id(1), [id(7), id(7)])
            .with_reposts(id(3), [id(8)]);
        let sets = fetch_many(&graph, Relation::Reposts, &[id(3), id(2), id(1)], 2).await;
        assert_eq!(sets, vec![vec![id(8)], vec![], vec![id(7), id(7)]]);
    }
}
