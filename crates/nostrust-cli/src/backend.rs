// crates/nostrust-cli/src/backend.rs
//
// Picks where the social graph comes from: a live relay, or a JSON snapshot
// loaded into a MemoryGraph for offline runs.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use nostrust_core::{MemoryGraph, NameResolver, NostrustError, SocialGraphSource};
use nostrust_relay::RelayClient;

use crate::config::CliConfig;

/// A graph source that can also name the identities it serves.
pub trait GraphBackend: SocialGraphSource + NameResolver {}

impl<T: SocialGraphSource + NameResolver + ?Sized> GraphBackend for T {}

/// Open the snapshot at `graph` if given, otherwise the configured relay.
pub fn open(config: &CliConfig, graph: Option<&Path>) -> Result<Arc<dyn GraphBackend>, NostrustError> {
    match graph {
        Some(path) => {
            let graph = load_snapshot(path)?;
            tracing::info!("Using offline graph snapshot {}", path.display());
            Ok(Arc::new(graph))
        }
        None => {
            tracing::info!("Using relay {}", config.relay_url);
            let client = RelayClient::new(config.relay_url.clone())
                .with_timeouts(config.fetch_timeout(), config.name_timeout());
            Ok(Arc::new(client))
        }
    }
}

/// Read a `MemoryGraph` serialized as JSON.
pub fn load_snapshot(path: &Path) -> Result<MemoryGraph, NostrustError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| NostrustError::Config(format!("read graph {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostrust_core::Identity;

    fn id(n: u8) -> Identity {
        Identity::from_bytes([n; 32])
    }

    #[tokio::test]
    async fn snapshot_loads_from_json() {
        let path = std::env::temp_dir().join(format!("nostrust-graph-{}.json", std::process::id()));
        let json = serde_json::json!({
            "follows": { id(1).to_hex(): [id(2).to_hex(), id(3).to_hex()] },
            "names": { id(2).to_hex(): "bob" },
        });
        fs::write(&path, json.to_string()).unwrap();

        let backend = open(&CliConfig::default(), Some(&path)).unwrap();
        assert_eq!(backend.get_follows(&id(1)).await.unwrap(), vec![id(2), id(3)]);
        assert!(backend.get_mutes(&id(1)).await.unwrap().is_empty());
        assert_eq!(backend.display_name(&id(2)).await, "bob");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_snapshot_is_a_config_error() {
        let err = load_snapshot(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, NostrustError::Config(_)));
    }

    #[test]
    fn malformed_snapshot_is_a_serialization_error() {
        let path = std::env::temp_dir().join(format!("nostrust-bad-{}.json", std::process::id()));
        fs::write(&path, r#"{"follows": {"zz": []}}"#).unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert!(matches!(err, NostrustError::Serialization(_)));
        fs::remove_file(&path).unwrap();
    }
}
