// crates/nostrust-relay/src/extract.rs
//
// Turning subscription results into identity sets.
//
// Follow and mute lists are replaceable events, so only the newest one
// counts. Reports and reposts are regular events and are read in full.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

use nostrust_core::Identity;

use crate::event::Event;

/// The newest event of the batch; the first one wins a tie.
pub fn latest(events: &[Event]) -> Option<&Event> {
    events
        .iter()
        .reduce(|best, e| if e.created_at > best.created_at { e } else { best })
}

/// Valid `p` tag targets of one event, in tag order, duplicates kept.
pub fn tagged_identities(event: &Event) -> Vec<Identity> {
    event
        .p_tag_values()
        .filter_map(|value| match Identity::from_hex(value) {
            Ok(identity) => Some(identity),
            Err(_) => {
                debug!(value, event = %event.id, "skipping malformed p tag");
                None
            }
        })
        .collect()
}

/// Entries of the newest follow or mute list.
pub fn list_members(events: &[Event]) -> Vec<Identity> {
    latest(events).map(tagged_identities).unwrap_or_default()
}

/// Distinct authors of the batch, in arrival order.
pub fn distinct_authors(events: &[Event]) -> Vec<Identity> {
    let mut seen = HashSet::new();
    events
        .iter()
        .filter_map(Event::author)
        .filter(|author| seen.insert(*author))
        .collect()
}

/// Distinct `p` tag targets across the batch, in arrival order.
pub fn distinct_targets(events: &[Event]) -> Vec<Identity> {
    let mut seen = HashSet::new();
    events
        .iter()
        .flat_map(tagged_identities)
        .filter(|target| seen.insert(*target))
        .collect()
}

/// Every `p` tag target across the batch, duplicates kept.
pub fn all_targets(events: &[Event]) -> Vec<Identity> {
    events.iter().flat_map(tagged_identities).collect()
}

#[derive(Debug, Default, Deserialize)]
struct ProfileMetadata {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Display name from the newest profile event: `display_name` if set, else
/// `name`. `None` when neither is usable.
pub fn display_name(events: &[Event]) -> Option<String> {
    let event = latest(events)?;
    let profile: ProfileMetadata = serde_json::from_str(&event.content).ok()?;
    [profile.display_name, profile.name]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
}
