//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `vidp-crypto`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from cryptographic operations in the VID Pipeline.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),

    /// Invalid Ed25519 signature length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Invalid Ed25519 public key.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid Ed25519 signing key material.
    #[error("invalid Ed25519 signing key: {0}")]
    InvalidSigningKey(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// No verifying key is registered for the named issuer.
    #[error("no verifying key registered for issuer {0}")]
    UnknownIssuer(String),
}
