//! # Ed25519 Signing and Verification
//!
//! Wrappers around `ed25519-dalek` for credential signatures.
//!
//! ## Security Invariants
//!
//! - Signing input MUST be `&Claims` — you cannot sign raw bytes. Every
//!   signature in the system covers a typed claims payload.
//! - Private keys are never serialized or logged. [`SigningKey`] does not
//!   implement `Serialize`, and its `Debug` output is redacted. Key
//!   material is zeroized on drop (dalek's `zeroize` feature).
//!
//! ## Serde
//!
//! Public keys and signatures serialize/deserialize as hex-encoded strings.

use ed25519_dalek::{Signer, Verifier};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use vidp_core::Claims;

use crate::error::CryptoError;

/// An Ed25519 signature (64 bytes).
///
/// Serializes as a 128-character hex string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

/// An Ed25519 verifying (public) key.
///
/// Serializes as a 64-character hex string.
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey {
    inner: ed25519_dalek::VerifyingKey,
}

/// An Ed25519 signing key.
///
/// Does not implement `Serialize` — private keys must not be accidentally
/// serialized into logs, responses, or artifacts.
pub struct SigningKey {
    inner: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render the signature as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 128 {
            return Err(CryptoError::InvalidSignatureLength(hex.len() / 2));
        }
        let bytes = hex_to_bytes(&hex)?;
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Serialize for Ed25519Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// VerifyingKey impls
// ---------------------------------------------------------------------------

impl VerifyingKey {
    /// Create a verifying key from raw 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes are not a
    /// valid curve point.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let inner = ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Return the raw 32-byte public key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes()
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.to_bytes().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let hex = hex.trim().to_lowercase();
        if hex.len() != 64 {
            return Err(CryptoError::InvalidPublicKey(format!(
                "public key hex must be 64 chars, got {}",
                hex.len()
            )));
        }
        let bytes = hex_to_bytes(&hex)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Self::from_bytes(&arr)
    }

    /// Verify an Ed25519 signature over a claims payload.
    ///
    /// # Security Invariant
    ///
    /// The message parameter is `&Claims`, enforcing at compile time that
    /// only typed claims payloads can be verified.
    pub fn verify(&self, claims: &Claims, signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        self.inner
            .verify(claims.as_bytes(), &sig)
            .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
    }
}

impl Serialize for VerifyingKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifyingKey({}...)", hex_prefix(&self.to_bytes()))
    }
}

impl std::fmt::Display for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// SigningKey impls
// ---------------------------------------------------------------------------

impl SigningKey {
    /// Generate a new random Ed25519 signing key from the given CSPRNG.
    pub fn generate<R: rand_core::CryptoRngCore + ?Sized>(csprng: &mut R) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::generate(csprng),
        }
    }

    /// Create a signing key from a raw 32-byte seed.
    pub fn from_bytes(seed: &[u8; 32]) -> Self {
        Self {
            inner: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Parse a signing key from a 64-character hex seed (e.g. injected via
    /// environment). Intermediate buffers are zeroized.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex_to_bytes(hex.trim())?;
        if bytes.len() != 32 {
            let got = bytes.len();
            bytes.zeroize();
            return Err(CryptoError::InvalidSigningKey(format!(
                "expected 32-byte seed (64 hex chars), got {got} bytes"
            )));
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&bytes);
        bytes.zeroize();
        let key = Self::from_bytes(&seed);
        seed.zeroize();
        Ok(key)
    }

    /// Return the verifying key for this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign a claims payload.
    ///
    /// # Security Invariant
    ///
    /// You cannot sign raw `&[u8]` — the input must be a typed [`Claims`]
    /// payload.
    pub fn sign(&self, claims: &Claims) -> Ed25519Signature {
        let sig = self.inner.sign(claims.as_bytes());
        Ed25519Signature(sig.to_bytes())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

pub(crate) fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CryptoError> {
    if hex.len() % 2 != 0 {
        return Err(CryptoError::HexDecode(
            "hex string must have even length".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CryptoError::HexDecode(format!("invalid hex at position {i}: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn sign_and_verify() {
        let sk = SigningKey::generate(&mut OsRng);
        let claims = Claims::from("kyc:ok");
        let sig = sk.sign(&claims);
        sk.verifying_key()
            .verify(&claims, &sig)
            .expect("valid signature should verify");
    }

    #[test]
    fn verify_wrong_key_fails() {
        let sk1 = SigningKey::generate(&mut OsRng);
        let sk2 = SigningKey::generate(&mut OsRng);
        let claims = Claims::from("kyc:ok");
        let sig = sk1.sign(&claims);
        assert!(sk2.verifying_key().verify(&claims, &sig).is_err());
    }

    #[test]
    fn verify_tampered_claims_fails() {
        let sk = SigningKey::generate(&mut OsRng);
        let sig = sk.sign(&Claims::from("kyc:ok"));
        assert!(sk
            .verifying_key()
            .verify(&Claims::from("kyc:no"), &sig)
            .is_err());
    }

    #[test]
    fn deterministic_from_seed() {
        let seed = [42u8; 32];
        let sk1 = SigningKey::from_bytes(&seed);
        let sk2 = SigningKey::from_bytes(&seed);
        assert_eq!(sk1.verifying_key(), sk2.verifying_key());

        let claims = Claims::from("deterministic");
        assert_eq!(sk1.sign(&claims), sk2.sign(&claims));
    }

    #[test]
    fn signature_hex_roundtrip() {
        let sk = SigningKey::generate(&mut OsRng);
        let sig = sk.sign(&Claims::from("x"));
        let hex = sig.to_hex();
        assert_eq!(hex.len(), 128);
        assert_eq!(Ed25519Signature::from_hex(&hex).unwrap(), sig);
    }

    #[test]
    fn verifying_key_hex_roundtrip() {
        let vk = SigningKey::generate(&mut OsRng).verifying_key();
        let hex = vk.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(VerifyingKey::from_hex(&hex).unwrap(), vk);
    }

    #[test]
    fn signature_serde_roundtrip() {
        let sk = SigningKey::generate(&mut OsRng);
        let sig = sk.sign(&Claims::from("y"));
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json.len(), 128 + 2);
        let back: Ed25519Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }

    #[test]
    fn invalid_hex_rejected() {
        assert!(Ed25519Signature::from_hex("aabb").is_err());
        assert!(VerifyingKey::from_hex("not-hex").is_err());
        assert!(VerifyingKey::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let sk = SigningKey::generate(&mut OsRng);
        assert_eq!(format!("{sk:?}"), "SigningKey(<private>)");
    }

    #[test]
    fn signing_key_from_hex_seed() {
        let seed_hex = "2a".repeat(32);
        let sk = SigningKey::from_hex(&seed_hex).unwrap();
        assert_eq!(sk.verifying_key(), SigningKey::from_bytes(&[0x2a; 32]).verifying_key());
        assert!(SigningKey::from_hex("abcd").is_err());
    }
}
