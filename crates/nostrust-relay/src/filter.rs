// crates/nostrust-relay/src/filter.rs
//
// NIP-01 subscription filters and the event kinds nostrust asks for.

use serde::Serialize;

use nostrust_core::Identity;

/// Event kinds used by the social graph lookups.
pub mod kind {
    pub const PROFILE_METADATA: u16 = 0;
    pub const FOLLOW_LIST: u16 = 3;
    pub const REPOST: u16 = 6;
    pub const GENERIC_REPOST: u16 = 16;
    pub const REPORTING: u16 = 1984;
    pub const MUTE_LIST: u16 = 10000;
}

/// Upper bounds on events requested per lookup.
pub const REPORT_LIMIT: u32 = 1000;
pub const REPOST_LIMIT: u32 = 2000;

/// A subscription filter, serialized as the third element of a `REQ`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Events tagging these keys with a `p` tag.
    #[serde(rename = "#p", skip_serializing_if = "Vec::is_empty")]
    pub p_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Filter {
    /// Events of `kinds` published by `author`.
    pub fn authored_by(kinds: &[u16], author: &Identity, limit: u32) -> Self {
        Self {
            kinds: kinds.to_vec(),
            authors: vec![author.to_hex()],
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Events of `kinds` that tag `target`.
    pub fn tagging(kinds: &[u16], target: &Identity, limit: u32) -> Self {
        Self {
            kinds: kinds.to_vec(),
            p_tags: vec![target.to_hex()],
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn follows(identity: &Identity) -> Self {
        Self::authored_by(&[kind::FOLLOW_LIST], identity, 1)
    }

    pub fn mutes(identity: &Identity) -> Self {
        Self::authored_by(&[kind::MUTE_LIST], identity, 1)
    }

    pub fn reports_by(identity: &Identity) -> Self {
        Self::authored_by(&[kind::REPORTING], identity, REPORT_LIMIT)
    }

    pub fn reports_of(identity: &Identity) -> Self {
        Self::tagging(&[kind::REPORTING], identity, REPORT_LIMIT)
    }

    pub fn reposts(identity: &Identity) -> Self {
        Self::authored_by(&[kind::REPOST, kind::GENERIC_REPOST], identity, REPOST_LIMIT)
    }

    pub fn profile(identity: &Identity) -> Self {
        Self::authored_by(&[kind::PROFILE_METADATA], identity, 1)
    }
}
