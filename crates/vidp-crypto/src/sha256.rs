//! # Proof-Digest Derivation
//!
//! The deterministic two-stage digest that binds a credential's claims to
//! its issuer signature:
//!
//! ```text
//! proof_hash = SHA-256(claims)
//! full_hash  = SHA-256(proof_hash ‖ signature)
//! ```
//!
//! The concatenation is order-sensitive and the result is bit-identical for
//! identical `(claims, signature)` pairs — this digest is what downstream
//! caching and authorization trust as evidence of verification.

use sha2::{Digest, Sha256};

use vidp_core::{claims_digest, Claims, ContentDigest, DigestAlgorithm};

use crate::ed25519::Ed25519Signature;

/// Compute the full proof digest binding claims and signature.
///
/// Pure function of `(claims, signature)`: the claims digest is computed
/// first, then rehashed with the signature bytes appended.
pub fn proof_digest(claims: &Claims, signature: &Ed25519Signature) -> ContentDigest {
    let inner = claims_digest(claims);

    let mut hasher = Sha256::new();
    hasher.update(inner.bytes);
    hasher.update(signature.as_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}
