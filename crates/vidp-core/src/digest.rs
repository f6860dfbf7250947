//! # Content Digest — Algorithm-Tagged Proof Hashes
//!
//! Defines [`ContentDigest`] and [`DigestAlgorithm`], the digest types used
//! for cached verification proofs, plus [`claims_digest()`] — the first half
//! of the deterministic proof-hash derivation.
//!
//! ## Security Invariant
//!
//! `claims_digest()` accepts only `&Claims`. Raw byte slices cannot be
//! hashed, so every claims digest in the system is computed over the typed
//! claims payload.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::claims::Claims;
use crate::error::ValidationError;
use crate::identity::hex_to_bytes;

/// The hash algorithm used to produce a content digest.
///
/// SHA-256 is the only algorithm in use; the tag keeps digests
/// self-describing for forward migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 — standard content addressing.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content digest with its algorithm tag.
///
/// The 32-byte digest and algorithm tag together form a self-describing
/// identifier, displayed as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a digest from raw bytes and algorithm.
    ///
    /// Prefer [`claims_digest()`] (or the full proof derivation in
    /// `vidp-crypto`) over constructing digests by hand.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a digest from its `sha256:<hex>` display form.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let s = value.trim();
        let hex = s
            .strip_prefix("sha256:")
            .ok_or_else(|| ValidationError::InvalidDigest(s.to_string()))?;
        if hex.len() != 64 {
            return Err(ValidationError::InvalidDigest(s.to_string()));
        }
        let bytes =
            hex_to_bytes(hex).map_err(|_| ValidationError::InvalidDigest(s.to_string()))?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self::new(DigestAlgorithm::Sha256, arr))
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute the SHA-256 digest of a claims payload.
///
/// This is the first stage of the proof-hash derivation; the full binding
/// digest over `(claims, signature)` lives in `vidp-crypto`.
pub fn claims_digest(claims: &Claims) -> ContentDigest {
    let hash = Sha256::digest(claims.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}
