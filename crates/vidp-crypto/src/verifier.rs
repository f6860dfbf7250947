//! # Pluggable Signature-Verification Capability
//!
//! [`SignatureVerifier`] abstracts the check that a credential's signature
//! was produced by the issuer's key. The verification component accepts any
//! implementation; [`Ed25519Verifier`] is the production one.
//!
//! The trait exists so the check is explicit and testable in isolation —
//! there is no code path that accepts a credential without running it.

use vidp_core::Claims;

use crate::ed25519::{Ed25519Signature, VerifyingKey};
use crate::error::CryptoError;

/// Capability to validate a credential signature against an issuer key.
///
/// Implementations must be `Send + Sync` so a single instance can back the
/// verification component across threads.
pub trait SignatureVerifier: Send + Sync {
    /// Check that `signature` over `claims` verifies under `issuer_key`.
    ///
    /// Returns `Ok(())` only for a valid signature; any failure is a typed
    /// error, never a silent pass.
    fn verify(
        &self,
        claims: &Claims,
        signature: &Ed25519Signature,
        issuer_key: &VerifyingKey,
    ) -> Result<(), CryptoError>;

    /// Human-readable scheme name for diagnostics/logging.
    fn scheme(&self) -> &str;
}

/// Ed25519 signature verification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        claims: &Claims,
        signature: &Ed25519Signature,
        issuer_key: &VerifyingKey,
    ) -> Result<(), CryptoError> {
        issuer_key.verify(claims, signature)
    }

    fn scheme(&self) -> &str {
        "ed25519"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ed25519::SigningKey;
    use rand_core::OsRng;

    #[test]
    fn accepts_valid_signature() {
        let sk = SigningKey::generate(&mut OsRng);
        let claims = Claims::from("kyc:ok");
        let sig = sk.sign(&claims);

        let verifier = Ed25519Verifier;
        verifier
            .verify(&claims, &sig, &sk.verifying_key())
            .expect("valid signature should pass");
    }

    #[test]
    fn rejects_wrong_issuer_key() {
        let sk = SigningKey::generate(&mut OsRng);
        let other = SigningKey::generate(&mut OsRng);
        let claims = Claims::from("kyc:ok");
        let sig = sk.sign(&claims);

        let verifier = Ed25519Verifier;
        assert!(verifier
            .verify(&claims, &sig, &other.verifying_key())
            .is_err());
    }

    #[test]
    fn rejects_tampered_claims() {
        let sk = SigningKey::generate(&mut OsRng);
        let sig = sk.sign(&Claims::from("kyc:ok"));

        let verifier = Ed25519Verifier;
        assert!(verifier
            .verify(&Claims::from("kyc:forged"), &sig, &sk.verifying_key())
            .is_err());
    }

    #[test]
    fn scheme_name() {
        assert_eq!(Ed25519Verifier.scheme(), "ed25519");
    }

    #[test]
    fn usable_as_trait_object() {
        let verifier: Box<dyn SignatureVerifier> = Box::new(Ed25519Verifier);
        let sk = SigningKey::generate(&mut OsRng);
        let claims = Claims::from("kyc:ok");
        let sig = sk.sign(&claims);
        assert!(verifier.verify(&claims, &sig, &sk.verifying_key()).is_ok());
    }
}
