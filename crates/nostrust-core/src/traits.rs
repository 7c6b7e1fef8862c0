// crates/nostrust-core/src/traits.rs

use async_trait::async_trait;

use crate::error::NostrustError;
use crate::identity::Identity;

/// Read access to the declared social graph.
///
/// Implemented by nostrust-relay (websocket relay client) and by
/// [`crate::MemoryGraph`]. Implementations own retries and timeouts; the
/// engine only decides whether a failure is fatal or degrades to "no data".
#[async_trait]
pub trait SocialGraphSource: Send + Sync {
    /// Identities `identity` follows, in declared order.
    async fn get_follows(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError>;

    /// Identities `identity` has muted.
    async fn get_mutes(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError>;

    /// Distinct identities that have reported `identity`.
    async fn get_reported_by(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError>;

    /// Identities `identity` has reported.
    async fn get_reports(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError>;

    /// Authors of notes `identity` has reposted. Duplicates are meaningful.
    async fn get_reposts(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError>;
}

/// Best-effort display name lookup.
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Human-readable name, or the npub form if none can be found.
    async fn display_name(&self, identity: &Identity) -> String;
}

/// Resolver that never leaves the process: every name is the npub.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpubResolver;

#[async_trait]
impl NameResolver for NpubResolver {
    async fn display_name(&self, identity: &Identity) -> String {
        identity.to_npub()
    }
}
