// crates/nostrust-core/src/error.rs

use thiserror::Error;

/// Error types shared by every nostrust crate.
#[derive(Debug, Error)]
pub enum NostrustError {
    /// An externally supplied key could not be decoded as hex or npub.
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Relay connection or transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// A lookup did not complete within its time bound.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// The relay sent something that does not follow the wire protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration value.
    #[error("Config error: {0}")]
    Config(String),

    /// The seed identity's own follow set could not be fetched, so the run
    /// has nothing to anchor on.
    #[error("Seed identity {identity} unreachable: {reason}")]
    SeedUnreachable { identity: String, reason: String },
}

impl NostrustError {
    /// Whether this error came from talking to the graph source, as opposed
    /// to bad input or configuration.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            NostrustError::Network(_) | NostrustError::Timeout(_) | NostrustError::Protocol(_)
        )
    }
}

impl From<serde_json::Error> for NostrustError {
    fn from(e: serde_json::Error) -> Self {
        NostrustError::Serialization(e.to_string())
    }
}

impl From<hex::FromHexError> for NostrustError {
    fn from(e: hex::FromHexError) -> Self {
        NostrustError::InvalidIdentity(e.to_string())
    }
}
