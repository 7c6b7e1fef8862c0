// crates/nostrust-relay/src/lib.rs
//
// nostrust-relay: websocket client for a single Nostr relay.
//
// Provides the wire types (filters, events, relay messages), the extraction
// rules that turn events into follow/mute/report/repost sets, and
// `RelayClient`, which implements the core `SocialGraphSource` and
// `NameResolver` traits on top of them.

pub mod client;
pub mod event;
pub mod extract;
pub mod filter;

pub use client::RelayClient;
pub use event::{Event, RelayMessage};
pub use filter::Filter;
