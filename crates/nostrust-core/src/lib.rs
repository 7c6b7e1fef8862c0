// crates/nostrust-core/src/lib.rs
//
// nostrust-core: Core types, traits, and configuration for the nostrust
// web-of-trust engine.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the identity key type, the error taxonomy, the run-wide engine
// parameters, and the trait interfaces through which the engine reads the
// social graph.

pub mod config;
pub mod error;
pub mod identity;
pub mod memory;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use nostrust_core::Identity;`

pub use config::EngineConfig;
pub use error::NostrustError;
pub use identity::Identity;
pub use memory::MemoryGraph;
pub use traits::{NameResolver, NpubResolver, SocialGraphSource};
