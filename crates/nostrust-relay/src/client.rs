// crates/nostrust-relay/src/client.rs
//
// RelayClient: one websocket connection per lookup against a single relay.
//
// Each lookup sends a REQ, collects EVENTs until EOSE, then sends CLOSE.
// The whole exchange is bounded by a timeout so a stalled relay costs one
// lookup, not the run.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};
use uuid::Uuid;

use nostrust_core::{Identity, NameResolver, NostrustError, SocialGraphSource};

use crate::event::{Event, RelayMessage};
use crate::extract;
use crate::filter::Filter;

/// Default bound on a social graph lookup.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on a profile lookup.
pub const DEFAULT_NAME_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for one relay, e.g. `ws://127.0.0.1:7777`.
#[derive(Debug, Clone)]
pub struct RelayClient {
    url: String,
    fetch_timeout: Duration,
    name_timeout: Duration,
}

impl RelayClient {
    /// Create a client with the default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            name_timeout: DEFAULT_NAME_TIMEOUT,
        }
    }

    /// Override the lookup and profile timeouts.
    pub fn with_timeouts(mut self, fetch_timeout: Duration, name_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self.name_timeout = name_timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run one subscription to completion and return its stored events.
    pub async fn query(&self, filter: &Filter, timeout: Duration) -> Result<Vec<Event>, NostrustError> {
        tokio::time::timeout(timeout, self.subscribe(filter))
            .await
            .map_err(|_| {
                NostrustError::Timeout(format!("no EOSE from {} within {:?}", self.url, timeout))
            })?
    }

    async fn subscribe(&self, filter: &Filter) -> Result<Vec<Event>, NostrustError> {
        let (mut ws, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| NostrustError::Network(format!("connect to {}: {}", self.url, e)))?;

        let subscription_id = Uuid::now_v7().simple().to_string();
        let request = json!(["REQ", subscription_id, filter]);
        ws.send(Message::Text(request.to_string()))
            .await
            .map_err(|e| NostrustError::Network(format!("send REQ: {}", e)))?;

        let mut events = Vec::new();
        while let Some(frame) = ws.next().await {
            let frame = frame.map_err(|e| NostrustError::Network(format!("read from {}: {}", self.url, e)))?;
            let text = match frame {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };
            let message = match RelayMessage::parse(&text) {
                Ok(message) => message,
                Err(e) => {
                    debug!("ignoring unparseable relay message: {}", e);
                    continue;
                }
            };
            match message {
                RelayMessage::Event { subscription_id: sub, event } if sub == subscription_id => {
                    events.push(*event);
                }
                RelayMessage::Eose { subscription_id: sub } if sub == subscription_id => break,
                RelayMessage::Closed { subscription_id: sub, message } if sub == subscription_id => {
                    return Err(NostrustError::Protocol(format!(
                        "relay closed subscription: {}",
                        message
                    )));
                }
                RelayMessage::Notice(notice) => warn!(relay = %self.url, "relay notice: {}", notice),
                _ => {}
            }
        }

        let close = json!(["CLOSE", subscription_id]);
        if let Err(e) = ws.send(Message::Text(close.to_string())).await {
            debug!("send CLOSE: {}", e);
        }
        // The relay may already have hung up; nothing left to read either way.
        let _ = ws.close(None).await;

        Ok(events)
    }

    async fn fetch(&self, filter: Filter) -> Result<Vec<Event>, NostrustError> {
        self.query(&filter, self.fetch_timeout).await
    }
}

#[async_trait]
impl SocialGraphSource for RelayClient {
    async fn get_follows(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        let events = self.fetch(Filter::follows(identity)).await?;
        Ok(extract::list_members(&events))
    }

    async fn get_mutes(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        let events = self.fetch(Filter::mutes(identity)).await?;
        Ok(extract::list_members(&events))
    }

    async fn get_reported_by(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        let events = self.fetch(Filter::reports_of(identity)).await?;
        Ok(extract::distinct_authors(&events))
    }

    async fn get_reports(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        let events = self.fetch(Filter::reports_by(identity)).await?;
        Ok(extract::distinct_targets(&events))
    }

    async fn get_reposts(&self, identity: &Identity) -> Result<Vec<Identity>, NostrustError> {
        let events = self.fetch(Filter::reposts(identity)).await?;
        Ok(extract::all_targets(&events))
    }
}

#[async_trait]
impl NameResolver for RelayClient {
    async fn display_name(&self, identity: &Identity) -> String {
        match self.query(&Filter::profile(identity), self.name_timeout).await {
            Ok(events) => extract::display_name(&events).unwrap_or_else(|| identity.to_npub()),
            Err(e) => {
                debug!(%identity, "profile lookup failed: {}", e);
                identity.to_npub()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts() {
        let client = RelayClient::new("ws://127.0.0.1:7777");
        assert_eq!(client.fetch_timeout, Duration::from_secs(30));
        assert_eq!(client.name_timeout, Duration::from_secs(15));
        assert_eq!(client.url(), "ws://127.0.0.1:7777");
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = RelayClient::new(format!("ws://127.0.0.1:{}", port))
            .with_timeouts(Duration::from_secs(5), Duration::from_secs(5));
        let err = client.get_follows(&Identity::from_bytes([1; 32])).await.unwrap_err();
        assert!(matches!(err, NostrustError::Network(_)));
    }

    #[tokio::test]
    async fn unreachable_relay_names_fall_back_to_npub() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = RelayClient::new(format!("ws://127.0.0.1:{}", port));
        let id = Identity::from_bytes([4; 32]);
        assert_eq!(client.display_name(&id).await, id.to_npub());
    }
}
