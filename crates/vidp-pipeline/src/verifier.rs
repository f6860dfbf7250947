//! # Verification Component
//!
//! [`Verifier`] derives the deterministic proof digest for a holder's
//! credential and records a DID-keyed [`VerificationResult`].
//!
//! The signature check is real and pluggable: the component holds a
//! [`SignatureVerifier`] capability and resolves the expected issuer's key
//! through the [`IssuerKeyring`]. The `expected_issuer` argument is
//! enforced against the credential's recorded issuer — a mismatch is a
//! typed failure, not an ignored parameter.
//!
//! Results are keyed by DID: verifying two different holders never
//! collides, and re-verifying the same holder replaces its result. A
//! failed check persists nothing, so a recorded result always reflects a
//! signature that verified (`valid` is true in every persisted record).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vidp_core::{ContentDigest, Did, Timestamp};
use vidp_crypto::{proof_digest, CryptoError, IssuerKeyring, SignatureVerifier};

use crate::registry::Registry;
use crate::stage::CredentialStage;

/// Errors from credential verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// No credential exists for the DID.
    #[error("no credential found for {0}")]
    CredentialNotFound(String),

    /// The credential was issued by a different identity than expected.
    #[error("issuer mismatch: expected {expected}, credential issued by {actual}")]
    IssuerMismatch {
        /// The issuer the caller expected.
        expected: String,
        /// The issuer recorded on the credential.
        actual: String,
    },

    /// No verifying key is registered for the expected issuer.
    #[error("unknown issuer: {0}")]
    UnknownIssuer(String),

    /// The credential signature failed validation.
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),
}

/// The outcome of a successful verification, keyed by DID in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// DID URI of the verified holder.
    pub did_uri: String,
    /// The derived proof digest.
    pub verified_hash: ContentDigest,
    /// Whether the signature check passed. Persisted results always carry
    /// `true`; a failed check aborts without recording anything.
    pub valid: bool,
    /// When the verification ran.
    pub verified_at: Timestamp,
}

/// The verification component.
pub struct Verifier {
    registry: Arc<Registry>,
    keyring: Arc<IssuerKeyring>,
    signature_verifier: Box<dyn SignatureVerifier>,
}

impl Verifier {
    /// Create a verifier with an explicit signature-verification
    /// capability.
    pub fn new(
        registry: Arc<Registry>,
        keyring: Arc<IssuerKeyring>,
        signature_verifier: Box<dyn SignatureVerifier>,
    ) -> Self {
        Self {
            registry,
            keyring,
            signature_verifier,
        }
    }

    /// Create a verifier using the production Ed25519 capability.
    pub fn ed25519(registry: Arc<Registry>, keyring: Arc<IssuerKeyring>) -> Self {
        Self::new(
            registry,
            keyring,
            Box::new(vidp_crypto::Ed25519Verifier),
        )
    }

    /// Verify the credential for `did` against `expected_issuer` and
    /// return the proof digest.
    ///
    /// The digest is a pure function of `(claims, signature)`:
    /// `SHA-256(SHA-256(claims) ‖ signature)` — bit-identical across
    /// repeated calls for the same credential.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::CredentialNotFound`] if no credential exists.
    /// - [`VerifyError::IssuerMismatch`] if the credential's issuer is not
    ///   `expected_issuer`.
    /// - [`VerifyError::UnknownIssuer`] if no key is registered for the
    ///   issuer.
    /// - [`VerifyError::SignatureInvalid`] if the signature check fails.
    ///   Nothing is persisted in that case.
    pub fn verify(&self, did: &Did, expected_issuer: &Did) -> Result<ContentDigest, VerifyError> {
        let credential = self
            .registry
            .credential(did)
            .ok_or_else(|| VerifyError::CredentialNotFound(did.uri()))?;

        if credential.issuer != *expected_issuer {
            return Err(VerifyError::IssuerMismatch {
                expected: expected_issuer.uri(),
                actual: credential.issuer.uri(),
            });
        }

        let issuer_key = self.keyring.resolve(expected_issuer).map_err(|e| match e {
            CryptoError::UnknownIssuer(uri) => VerifyError::UnknownIssuer(uri),
            other => VerifyError::SignatureInvalid(other.to_string()),
        })?;

        self.signature_verifier
            .verify(&credential.claims, &credential.signature, &issuer_key)
            .map_err(|e| VerifyError::SignatureInvalid(e.to_string()))?;

        let digest = proof_digest(&credential.claims, &credential.signature);
        self.registry.record_verification(
            *did,
            VerificationResult {
                did_uri: credential.did_uri(),
                verified_hash: digest.clone(),
                valid: true,
                verified_at: Timestamp::now(),
            },
        );
        self.registry.advance_stage(did, CredentialStage::Verified);

        tracing::debug!(
            did = %did,
            scheme = self.signature_verifier.scheme(),
            hash = %digest,
            "credential verified"
        );
        Ok(digest)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("scheme", &self.signature_verifier.scheme())
            .finish()
    }
}
