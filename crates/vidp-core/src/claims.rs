//! # Claims Newtype
//!
//! [`Claims`] wraps the serialized claims payload of a verifiable credential
//! (e.g. a KYC attestation). The wrapper exists so that digest computation
//! and Ed25519 signing can accept `&Claims` and nothing else — a digest or
//! signature over bytes that did not come through this type cannot be
//! expressed.
//!
//! The payload is treated as opaque: the pipeline never inspects claim
//! contents, it only hashes and signs them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::identity::hex_to_bytes;

/// Opaque serialized claims payload.
///
/// Serializes as a lowercase hex string. `Debug` shows only the length and
/// a short prefix — claim payloads may carry personal data and must not
/// leak into logs wholesale.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Claims(Vec<u8>);

impl Claims {
    /// Wrap a serialized claims payload.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Access the raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the payload as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a payload from a hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        let bytes = hex_to_bytes(hex.trim()).map_err(ValidationError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl From<&str> for Claims {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl Serialize for Claims {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Claims {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Claims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.iter().take(4).map(|b| format!("{b:02x}")).collect();
        write!(f, "Claims({} bytes, {prefix}...)", self.0.len())
    }
}
