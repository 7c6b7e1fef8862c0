// crates/nostrust-relay/src/event.rs
//
// Events and relay-to-client messages (NIP-01).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use nostrust_core::{Identity, NostrustError};

/// A Nostr event as delivered by a relay.
///
/// Signatures are not checked: the relay is trusted to serve what its
/// authors published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: String,
    pub pubkey: String,
    #[serde(default)]
    pub created_at: u64,
    pub kind: u16,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sig: String,
}

impl Event {
    /// The author, if its key is well formed.
    pub fn author(&self) -> Option<Identity> {
        Identity::from_hex(&self.pubkey).ok()
    }

    /// Values of every `p` tag, in tag order.
    pub fn p_tag_values(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|tag| tag.first().map(String::as_str) == Some("p"))
            .filter_map(|tag| tag.get(1).map(String::as_str))
    }
}

/// Messages a relay can send on a subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayMessage {
    /// `["EVENT", <subscription_id>, <event>]`
    Event {
        subscription_id: String,
        event: Box<Event>,
    },
    /// `["EOSE", <subscription_id>]`: stored events are exhausted.
    Eose { subscription_id: String },
    /// `["CLOSED", <subscription_id>, <message>]`: the relay refused or ended it.
    Closed {
        subscription_id: String,
        message: String,
    },
    /// `["NOTICE", <message>]`
    Notice(String),
    /// Anything else (`OK`, `AUTH`, `COUNT`, ...), kept by label.
    Other(String),
}

impl RelayMessage {
    /// Parse one text frame from the relay.
    pub fn parse(text: &str) -> Result<Self, NostrustError> {
        let value: Value = serde_json::from_str(text)?;
        let parts = value
            .as_array()
            .ok_or_else(|| NostrustError::Protocol(format!("relay message is not an array: {}", text)))?;
        let label = parts
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| NostrustError::Protocol(format!("relay message has no label: {}", text)))?;
        let string_at = |i: usize| -> Result<String, NostrustError> {
            parts
                .get(i)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| NostrustError::Protocol(format!("{} message missing field {}", label, i)))
        };

        match label {
            "EVENT" => {
                let subscription_id = string_at(1)?;
                let raw = parts
                    .get(2)
                    .cloned()
                    .ok_or_else(|| NostrustError::Protocol("EVENT message without event".to_string()))?;
                let event: Event = serde_json::from_value(raw)?;
                Ok(RelayMessage::Event {
                    subscription_id,
                    event: Box::new(event),
                })
            }
            "EOSE" => Ok(RelayMessage::Eose {
                subscription_id: string_at(1)?,
            }),
            "CLOSED" => Ok(RelayMessage::Closed {
                subscription_id: string_at(1)?,
                message: string_at(2).unwrap_or_default(),
            }),
            "NOTICE" => Ok(RelayMessage::Notice(string_at(1)?)),
            other => Ok(RelayMessage::Other(other.to_string())),
        }
    }
}
