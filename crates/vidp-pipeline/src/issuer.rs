//! # Credential Issuer
//!
//! [`Issuer`] creates a [`VerifiableCredential`] record for a holder DID
//! from a claims payload and an issuer signature, and appends an
//! [`IssuedEvent`] to the registry's event sink.
//!
//! Re-issuance to an already-credentialed holder is rejected: a credential
//! is insert-once, like every keyed record in the pipeline. Overwriting
//! would orphan the provenance of any proof already cached for the holder.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use thiserror::Error;

use vidp_core::{Claims, Did, Timestamp};
use vidp_crypto::Ed25519Signature;
use vidp_vc::{IssuedEvent, VerifiableCredential};

use crate::registry::Registry;
use crate::stage::CredentialStage;

/// Errors from credential issuance.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The event sink must be initialized before any issuance.
    #[error("cannot issue: event sink is not initialized")]
    Uninitialized,

    /// A credential already exists for the holder.
    #[error("credential already issued for {0}")]
    AlreadyIssued(String),
}

/// The issuance component. Writes credentials and issuance events through
/// the shared [`Registry`].
pub struct Issuer {
    registry: Arc<Registry>,
}

impl Issuer {
    /// Create an issuer over the shared registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Issue a credential for `holder`, signed by `issuer`.
    ///
    /// Stores the credential record and appends an [`IssuedEvent`] whose
    /// `did_uri` is the holder's `did:vidp:<hex>` URI. The event-sink
    /// write guard is held across the whole sequence, so the call either
    /// fully succeeds or leaves no trace.
    ///
    /// # Errors
    ///
    /// - [`IssueError::Uninitialized`] if [`Registry::init_event_sink()`]
    ///   has not been called.
    /// - [`IssueError::AlreadyIssued`] if the holder already has a
    ///   credential.
    pub fn issue(
        &self,
        issuer: &Did,
        holder: Did,
        claims: Claims,
        signature: Ed25519Signature,
    ) -> Result<IssuedEvent, IssueError> {
        let mut sink = self.registry.event_sink_mut();
        let log = sink.as_mut().ok_or(IssueError::Uninitialized)?;

        let issued_at = Timestamp::now();
        let credential =
            VerifiableCredential::new(holder, *issuer, claims, signature, issued_at);

        match self.registry.credentials().entry(holder) {
            Entry::Occupied(_) => return Err(IssueError::AlreadyIssued(holder.uri())),
            Entry::Vacant(slot) => {
                slot.insert(credential);
            }
        }

        let event = log.append(holder.uri(), issued_at);
        self.registry.advance_stage(&holder, CredentialStage::Issued);

        tracing::info!(
            holder = %holder,
            issuer = %issuer,
            sequence = event.sequence,
            "credential issued"
        );
        Ok(event)
    }
}

impl std::fmt::Debug for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuer")
            .field("registry", &self.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::OsRng;
    use vidp_crypto::SigningKey;

    fn setup() -> (Arc<Registry>, Issuer, Did, SigningKey) {
        let registry = Arc::new(Registry::new());
        let issuer = Issuer::new(Arc::clone(&registry));
        let issuer_did = Did::from_bytes([2u8; 32]);
        let key = SigningKey::generate(&mut OsRng);
        (registry, issuer, issuer_did, key)
    }

    #[test]
    fn issue_before_init_fails_uninitialized() {
        let (_registry, issuer, issuer_did, key) = setup();
        let claims = Claims::from("kyc:ok");
        let sig = key.sign(&claims);

        let result = issuer.issue(&issuer_did, Did::from_bytes([1u8; 32]), claims, sig);
        assert!(matches!(result, Err(IssueError::Uninitialized)));
    }

    #[test]
    fn issue_stores_credential_and_emits_event() {
        let (registry, issuer, issuer_did, key) = setup();
        registry.init_event_sink(Did::from_bytes([0xad; 32])).unwrap();

        let holder = Did::from_bytes([1u8; 32]);
        let claims = Claims::from("kyc:ok");
        let sig = key.sign(&claims);

        let event = issuer.issue(&issuer_did, holder, claims.clone(), sig).unwrap();
        assert_eq!(event.sequence, 0);
        assert_eq!(event.did_uri, holder.uri());

        let stored = registry.credential(&holder).expect("credential stored");
        assert_eq!(stored.issuer, issuer_did);
        assert_eq!(stored.claims, claims);
        assert_eq!(registry.credential_count(), 1);
        assert_eq!(registry.stage_of(&holder), CredentialStage::Issued);
    }

    #[test]
    fn reissuance_is_rejected() {
        let (registry, issuer, issuer_did, key) = setup();
        registry.init_event_sink(Did::from_bytes([0xad; 32])).unwrap();

        let holder = Did::from_bytes([1u8; 32]);
        let claims = Claims::from("kyc:ok");
        let sig = key.sign(&claims);

        issuer
            .issue(&issuer_did, holder, claims.clone(), sig.clone())
            .unwrap();
        let second = issuer.issue(&issuer_did, holder, claims, sig);
        assert!(matches!(second, Err(IssueError::AlreadyIssued(_))));

        // The failed call must not have appended an event.
        assert_eq!(registry.events().len(), 1);
    }

    #[test]
    fn events_are_ordered_by_issuance() {
        let (registry, issuer, issuer_did, key) = setup();
        registry.init_event_sink(Did::from_bytes([0xad; 32])).unwrap();

        for i in 0..3u8 {
            let claims = Claims::from("kyc:ok");
            let sig = key.sign(&claims);
            issuer
                .issue(&issuer_did, Did::from_bytes([i; 32]), claims, sig)
                .unwrap();
        }

        let events = registry.events();
        let sequences: Vec<u64> = events.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }
}
