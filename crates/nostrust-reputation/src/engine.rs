// crates/nostrust-reputation/src/engine.rs
//
// Pipeline driver: owns the configuration and the graph source, and threads
// one ledger through every pass in order.

use std::sync::Arc;

use tracing::info;

use nostrust_core::{EngineConfig, Identity, NostrustError, SocialGraphSource};

use crate::boost::apply_repost_boost;
use crate::distrust::{apply_mute_distrust, apply_report_distrust, apply_untrusted_report_distrust};
use crate::follow::propagate_follows;
use crate::ledger::Ledger;

/// Computes trust ledgers from one seed identity's point of view.
pub struct TrustEngine<S: SocialGraphSource + ?Sized> {
    config: EngineConfig,
    source: Arc<S>,
}

impl<S: SocialGraphSource + ?Sized> TrustEngine<S> {
    /// Create an engine, rejecting invalid configurations up front.
    pub fn new(config: EngineConfig, source: Arc<S>) -> Result<Self, NostrustError> {
        config.validate()?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Run the full pipeline: follows, mutes, reports, reposts.
    ///
    /// Fails only if the seed's own follow set cannot be fetched.
    pub async fn run(&self, seed: Identity) -> Result<Ledger, NostrustError> {
        self.run_with_depth(seed, self.config.follow_ttl).await
    }

    /// Same as [`TrustEngine::run`] with an explicit follow depth.
    pub async fn run_with_depth(&self, seed: Identity, depth: u32) -> Result<Ledger, NostrustError> {
        let source = self.source.as_ref();
        let mut ledger = Ledger::seeded(seed);

        propagate_follows(source, &self.config, &mut ledger, &seed, depth).await?;
        info!(scored = ledger.len(), "follow pass done");

        apply_mute_distrust(source, &self.config, &mut ledger).await;
        apply_report_distrust(source, &self.config, &mut ledger).await;
        apply_repost_boost(source, &self.config, &mut ledger).await;

        info!(scored = ledger.len(), "trust pipeline done");
        Ok(ledger)
    }

    /// Pull `identities` out of `ledger` (unscored ones at `0.0`) and apply
    /// the untrusted-report penalty to that subset only.
    pub async fn benchmark(&self, ledger: &Ledger, identities: &[Identity]) -> Ledger {
        let mut subset = ledger.subset(identities);
        apply_untrusted_report_distrust(self.source.as_ref(), &self.config, &mut subset).await;
        subset
    }

    /// Score one identity on demand, including the untrusted-report penalty.
    pub async fn lookup(&self, ledger: &Ledger, identity: Identity) -> f64 {
        self.benchmark(ledger, &[identity]).await.score(&identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostrust_core::MemoryGraph;

    fn id(n: u8) -> Identity {
        Identity::from_bytes([n; 32])
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            minimum_trust_score: f64::INFINITY,
            ..EngineConfig::default()
        };
        assert!(TrustEngine::new(config, Arc::new(MemoryGraph::new())).is_err());
    }

    #[tokio::test]
    async fn isolated_seed_scores_only_itself() {
        let engine = TrustEngine::new(EngineConfig::default(), Arc::new(MemoryGraph::new())).unwrap();
        let ledger = engine.run(id(1)).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&id(1)), Some(1.0));
    }

    #[tokio::test]
    async fn lookup_applies_untrusted_reports() {
        let (s, a, outsider) = (id(1), id(2), id(50));
        let graph = MemoryGraph::new()
            .with_follows(s, [a])
            .with_reports(outsider, [a]);
        let engine = TrustEngine::new(EngineConfig::default(), Arc::new(graph)).unwrap();
        let ledger = engine.run(s).await.unwrap();

        // outsider is unscored, so its report is no penalty in the main run.
        assert_eq!(ledger.get(&a), Some(1.0));
        let score = engine.lookup(&ledger, a).await;
        assert!((score - (1.0 - 0.000001)).abs() < 1e-12);
        // The pipeline ledger itself is untouched.
        assert_eq!(ledger.get(&a), Some(1.0));
    }

    #[tokio::test]
    async fn lookup_of_unscored_identity_starts_at_zero() {
        let engine = TrustEngine::new(EngineConfig::default(), Arc::new(MemoryGraph::new())).unwrap();
        let ledger = Ledger::seeded(id(1));
        assert_eq!(engine.lookup(&ledger, id(7)).await, 0.0);
    }
}
