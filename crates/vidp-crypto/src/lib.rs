//! # vidp-crypto — Cryptographic Primitives for the VID Pipeline
//!
//! This crate provides the cryptographic building blocks used throughout
//! the workspace:
//!
//! - **Ed25519** signing and verification for credential signatures
//!   ([`SigningKey`], [`VerifyingKey`], [`Ed25519Signature`]).
//! - **Proof-digest derivation** ([`proof_digest()`]): the deterministic
//!   two-stage SHA-256 binding of claims and signature.
//! - **The pluggable signature-verification capability**
//!   ([`SignatureVerifier`]) with [`Ed25519Verifier`] as the production
//!   implementation.
//! - **Issuer key directory** ([`IssuerKeyring`]) mapping issuer DIDs to
//!   verifying keys.
//!
//! ## Crate Policy
//!
//! - Depends only on `vidp-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   claims, real SHA-256, real Ed25519.
//! - `unsafe` prohibited.

pub mod ed25519;
pub mod error;
pub mod keyring;
pub mod sha256;
pub mod verifier;

// Re-export primary types.
pub use ed25519::{Ed25519Signature, SigningKey, VerifyingKey};
pub use error::CryptoError;
pub use keyring::IssuerKeyring;
pub use sha256::proof_digest;
pub use verifier::{Ed25519Verifier, SignatureVerifier};
