//! # Verifiable Credential Record
//!
//! [`VerifiableCredential`] is the record created once per issuance: the
//! holder's DID, the issuer's DID, the opaque claims payload, and the
//! issuer's Ed25519 signature over those claims.
//!
//! There is no update or revoke operation on the record itself — a
//! credential is immutable once issued. Freshness is managed downstream by
//! the proof cache.

use serde::{Deserialize, Serialize};

use vidp_core::{Claims, Did, Timestamp};
use vidp_crypto::{Ed25519Signature, SigningKey};

/// A verifiable credential bound to a holder DID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// DID of the credential holder.
    pub holder: Did,
    /// DID of the issuing identity.
    pub issuer: Did,
    /// Serialized claims payload (e.g. a KYC attestation).
    pub claims: Claims,
    /// Issuer signature over the claims.
    pub signature: Ed25519Signature,
    /// When the credential was issued (UTC, seconds precision).
    pub issued_at: Timestamp,
}

impl VerifiableCredential {
    /// Assemble a credential from an already-produced signature.
    pub fn new(
        holder: Did,
        issuer: Did,
        claims: Claims,
        signature: Ed25519Signature,
        issued_at: Timestamp,
    ) -> Self {
        Self {
            holder,
            issuer,
            claims,
            signature,
            issued_at,
        }
    }

    /// Sign `claims` with the issuer's key and assemble the credential,
    /// stamped with the current time.
    pub fn signed(holder: Did, issuer: Did, claims: Claims, issuer_key: &SigningKey) -> Self {
        let signature = issuer_key.sign(&claims);
        Self::new(holder, issuer, claims, signature, Timestamp::now())
    }

    /// The holder's DID URI (`did:vidp:<hex>`).
    pub fn did_uri(&self) -> String {
        self.holder.uri()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;

    #[test]
    fn signed_produces_verifiable_signature() {
        let key = SigningKey::generate(&mut OsRng);
        let holder = Did::from_bytes([1u8; 32]);
        let issuer = Did::from_bytes([2u8; 32]);

        let vc = VerifiableCredential::signed(holder, issuer, Claims::from("kyc:ok"), &key);
        assert_eq!(vc.holder, holder);
        assert_eq!(vc.issuer, issuer);
        key.verifying_key()
            .verify(&vc.claims, &vc.signature)
            .expect("signature covers the claims");
    }

    #[test]
    fn did_uri_uses_holder() {
        let key = SigningKey::generate(&mut OsRng);
        let holder = Did::from_bytes([0xaa; 32]);
        let vc = VerifiableCredential::signed(
            holder,
            Did::from_bytes([2u8; 32]),
            Claims::from("kyc:ok"),
            &key,
        );
        assert_eq!(vc.did_uri(), holder.uri());
    }

    #[test]
    fn serde_roundtrip() {
        let key = SigningKey::generate(&mut OsRng);
        let vc = VerifiableCredential::signed(
            Did::from_bytes([1u8; 32]),
            Did::from_bytes([2u8; 32]),
            Claims::from("kyc:ok"),
            &key,
        );
        let json = serde_json::to_string(&vc).unwrap();
        let back: VerifiableCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(vc, back);
    }
}
