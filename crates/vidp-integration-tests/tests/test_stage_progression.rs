// SPDX-License-Identifier: BUSL-1.1
//! Per-DID stage progression across the pipeline.
//!
//! The stage walks strictly forward — Unissued → Issued → Verified →
//! Cached → Authorized — and failed preconditions leave it untouched.
//! Proof invalidation is the single sanctioned return edge (back to
//! Verified).

use std::sync::Arc;

use rand_core::OsRng;
use vidp_core::{Claims, Did};
use vidp_crypto::{IssuerKeyring, SigningKey};
use vidp_pipeline::{
    AccessControl, CredentialStage, Issuer, ProofCache, ProposalId, Registry, Verifier, VoteChoice,
};

struct Pipeline {
    registry: Arc<Registry>,
    issuer: Issuer,
    verifier: Verifier,
    cache: ProofCache,
    gate: AccessControl,
    issuer_did: Did,
    issuer_key: SigningKey,
}

fn pipeline() -> Pipeline {
    let registry = Arc::new(Registry::new());
    let keyring = Arc::new(IssuerKeyring::new());

    let issuer_key = SigningKey::generate(&mut OsRng);
    let issuer_did = Did::from_bytes([0x15; 32]);
    keyring.register(issuer_did, issuer_key.verifying_key());
    registry
        .init_event_sink(Did::from_bytes([0xad; 32]))
        .expect("init sink");

    Pipeline {
        issuer: Issuer::new(Arc::clone(&registry)),
        verifier: Verifier::ed25519(Arc::clone(&registry), Arc::clone(&keyring)),
        cache: ProofCache::new(Arc::clone(&registry)),
        gate: AccessControl::new(Arc::clone(&registry)),
        registry,
        issuer_did,
        issuer_key,
    }
}

#[test]
fn stage_advances_through_the_full_pipeline() {
    let p = pipeline();
    let holder = Did::from_bytes([0x01; 32]);
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Unissued);

    let claims = Claims::from("kyc:ok");
    let signature = p.issuer_key.sign(&claims);
    p.issuer
        .issue(&p.issuer_did, holder, claims, signature)
        .unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Issued);

    let hash = p.verifier.verify(&holder, &p.issuer_did).unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Verified);

    p.cache.store(&holder, &holder, hash).unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Cached);

    p.gate
        .submit_vote(&holder, &holder, ProposalId::new(), VoteChoice::For)
        .unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Authorized);
    assert!(p.registry.stage_of(&holder).is_terminal());
}

#[test]
fn failed_preconditions_leave_stage_unchanged() {
    let p = pipeline();
    let holder = Did::from_bytes([0x02; 32]);

    // Verification of an unissued DID fails; stage stays Unissued.
    assert!(p.verifier.verify(&holder, &p.issuer_did).is_err());
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Unissued);

    // Gated action without a proof fails; stage stays Unissued.
    assert!(p
        .gate
        .submit_vote(&holder, &holder, ProposalId::new(), VoteChoice::For)
        .is_err());
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Unissued);

    // Issue, then a duplicate issuance fails; stage stays Issued.
    let claims = Claims::from("kyc:ok");
    let signature = p.issuer_key.sign(&claims);
    p.issuer
        .issue(&p.issuer_did, holder, claims.clone(), signature.clone())
        .unwrap();
    assert!(p
        .issuer
        .issue(&p.issuer_did, holder, claims, signature)
        .is_err());
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Issued);
}

#[test]
fn invalidation_returns_the_did_to_verified() {
    let p = pipeline();
    let holder = Did::from_bytes([0x03; 32]);

    let claims = Claims::from("kyc:ok");
    let signature = p.issuer_key.sign(&claims);
    p.issuer
        .issue(&p.issuer_did, holder, claims, signature)
        .unwrap();
    let hash = p.verifier.verify(&holder, &p.issuer_did).unwrap();
    p.cache.store(&holder, &holder, hash.clone()).unwrap();
    p.gate
        .submit_vote(&holder, &holder, ProposalId::new(), VoteChoice::For)
        .unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Authorized);

    p.cache.invalidate(&holder).unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Verified);
    assert!(!p.gate.authorize(&holder));

    // The pipeline can be re-entered from the cache stage.
    p.cache.store(&holder, &holder, hash).unwrap();
    assert_eq!(p.registry.stage_of(&holder), CredentialStage::Cached);
    assert!(p.gate.authorize(&holder));
}
