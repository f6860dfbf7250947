//! # DID Identity Newtype
//!
//! [`Did`] is the opaque identifier of a credential holder or issuer: a
//! 32-byte value rendered as lowercase hex. The DID URI form concatenates
//! the fixed scheme prefix [`DID_SCHEME`] with the hex encoding, so the URI
//! of a given identity is stable and immutable.
//!
//! ## Validation
//!
//! String inputs are validated at construction: exactly 64 hex characters,
//! optionally prefixed with `did:vidp:`. Deserialization routes through the
//! same constructor so invalid values are rejected at the serde boundary —
//! not silently accepted.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// The fixed DID scheme prefix for pipeline identities.
pub const DID_SCHEME: &str = "did:vidp:";

/// Opaque 32-byte decentralized identifier.
///
/// Identifies a credential holder or issuer. Serializes as a 64-character
/// lowercase hex string; displays as the full `did:vidp:<hex>` URI.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Did([u8; 32]);

impl Did {
    /// Create a DID from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Return the raw 32-byte identifier.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a DID from a 64-character hex string, with or without the
    /// `did:vidp:` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the prefix is foreign or
    /// the remainder is not exactly 32 bytes of hex.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let s = value.trim();
        let hex = match s.strip_prefix(DID_SCHEME) {
            Some(rest) => rest,
            None if s.starts_with("did:") => {
                return Err(ValidationError::InvalidDid(s.to_string()));
            }
            None => s,
        };
        if hex.len() != 64 {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        let bytes =
            hex_to_bytes(hex).map_err(|_| ValidationError::InvalidDid(s.to_string()))?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Render the identifier as a lowercase hex string (no scheme prefix).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Render the full DID URI: [`DID_SCHEME`] followed by the hex encoding.
    pub fn uri(&self) -> String {
        format!("{DID_SCHEME}{}", self.to_hex())
    }
}

impl Serialize for Did {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "Did({prefix}...)")
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri())
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

pub(crate) fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}
