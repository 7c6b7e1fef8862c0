// crates/nostrust-core/src/identity.rs

use std::fmt;
use std::str::FromStr;

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::NostrustError;

/// Human-readable part of a bech32-encoded public key.
const NPUB_HRP: Hrp = Hrp::parse_unchecked("npub");

/// Identity of a participant on the network: a 32-byte public key.
///
/// Two identities are equal iff their key bytes are equal. Ordering is byte
/// order, which the ranker uses as its tie-break.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity([u8; 32]);

impl Identity {
    /// Wrap raw key bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Decode a 64-character hex public key.
    pub fn from_hex(s: &str) -> Result<Self, NostrustError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Lowercase hex form, as used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode a bech32 `npub1...` string.
    pub fn from_npub(s: &str) -> Result<Self, NostrustError> {
        let (hrp, data) = bech32::decode(s)
            .map_err(|e| NostrustError::InvalidIdentity(format!("{}: {}", s, e)))?;
        if hrp.to_lowercase() != NPUB_HRP.as_str() {
            return Err(NostrustError::InvalidIdentity(format!(
                "expected npub prefix, got {}",
                hrp
            )));
        }
        let bytes: [u8; 32] = data.try_into().map_err(|d: Vec<u8>| {
            NostrustError::InvalidIdentity(format!("npub payload is {} bytes, expected 32", d.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Canonical textual form shown to users.
    pub fn to_npub(&self) -> String {
        // 32 bytes never exceed the bech32 length limit; hex is a last resort.
        bech32::encode::<Bech32>(NPUB_HRP, &self.0).unwrap_or_else(|_| self.to_hex())
    }
}

impl FromStr for Identity {
    type Err = NostrustError;

    /// Accepts either an `npub1...` string or a 64-character hex key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("npub1")) {
            Self::from_npub(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.to_hex())
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference pair from NIP-19.
    const HEX: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";
    const NPUB: &str = "npub180cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsyjh6w6";

    #[test]
    fn decodes_nip19_npub() {
        let id = Identity::from_npub(NPUB).unwrap();
        assert_eq!(id.to_hex(), HEX);
        assert_eq!(id.to_npub(), NPUB);
    }

    #[test]
    fn from_str_accepts_both_forms() {
        let a: Identity = HEX.parse().unwrap();
        let b: Identity = NPUB.parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_short_hex() {
        let err = "abcd".parse::<Identity>().unwrap_err();
        assert!(matches!(err, NostrustError::InvalidIdentity(_)));
    }

    #[test]
    fn rejects_wrong_prefix() {
        // A valid bech32 string with an "nsec" prefix must not be accepted.
        let encoded =
            bech32::encode::<Bech32>(Hrp::parse_unchecked("nsec"), &[7u8; 32]).unwrap();
        assert!(Identity::from_npub(&encoded).is_err());
    }

    #[test]
    fn rejects_garbage_npub() {
        assert!("npub1notreallyakey".parse::<Identity>().is_err());
    }

    #[test]
    fn serde_uses_hex() {
        let id = Identity::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ordering_is_byte_order() {
        let low = Identity::from_bytes([1; 32]);
        let high = Identity::from_bytes([2; 32]);
        assert!(low < high);
    }
}
