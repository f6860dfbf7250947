//! # vidp-pipeline — Credential Proof Pipeline
//!
//! The core of the VID Pipeline: issue a credential, verify it into a
//! deterministic proof digest, cache the proof, and gate a protected
//! action on the cached proof's existence.
//!
//! ## Components
//!
//! - **Registry** ([`registry`]): the single owned state holder — the
//!   credential store, DID-keyed verification results, proof cache, stage
//!   map, and the init-once issuance event sink.
//!
//! - **Issuer** ([`issuer`]): creates credential records and appends
//!   [`IssuedEvent`](vidp_vc::IssuedEvent)s; requires the event sink to be
//!   initialized first.
//!
//! - **Verifier** ([`verifier`]): derives
//!   `SHA-256(SHA-256(claims) ‖ signature)` for a holder's credential,
//!   enforcing the expected issuer and running the pluggable signature
//!   check before anything is recorded.
//!
//! - **ProofCache** ([`cache`]): insert-once proof storage with explicit
//!   `refresh` and `invalidate` paths.
//!
//! - **AccessControl** ([`gate`]): proof-gated voting.
//!
//! Every operation is all-or-nothing: a failed precondition yields a typed
//! error and leaves no partial state. Per-DID progress is tracked by
//! [`CredentialStage`], which only moves forward (proof invalidation being
//! the one sanctioned return edge, back to `Verified`).
//!
//! ## Wiring
//!
//! ```
//! use std::sync::Arc;
//! use rand_core::OsRng;
//! use vidp_core::{Claims, Did};
//! use vidp_crypto::{IssuerKeyring, SigningKey};
//! use vidp_pipeline::{AccessControl, Issuer, ProofCache, Registry, Verifier};
//!
//! let registry = Arc::new(Registry::new());
//! let keyring = Arc::new(IssuerKeyring::new());
//!
//! let issuer_key = SigningKey::generate(&mut OsRng);
//! let issuer_did = Did::from_bytes([2u8; 32]);
//! keyring.register(issuer_did, issuer_key.verifying_key());
//!
//! let issuer = Issuer::new(Arc::clone(&registry));
//! let verifier = Verifier::ed25519(Arc::clone(&registry), Arc::clone(&keyring));
//! let cache = ProofCache::new(Arc::clone(&registry));
//! let gate = AccessControl::new(Arc::clone(&registry));
//!
//! registry.init_event_sink(Did::from_bytes([0xad; 32])).unwrap();
//!
//! let holder = Did::from_bytes([1u8; 32]);
//! let claims = Claims::from("kyc:ok");
//! let signature = issuer_key.sign(&claims);
//!
//! issuer.issue(&issuer_did, holder, claims, signature).unwrap();
//! let hash = verifier.verify(&holder, &issuer_did).unwrap();
//! cache.store(&holder, &holder, hash).unwrap();
//! assert!(gate.authorize(&holder));
//! ```

pub mod cache;
pub mod gate;
pub mod issuer;
pub mod registry;
pub mod stage;
pub mod verifier;

// Re-export primary types.
pub use cache::{CacheError, CachedProof, ProofCache};
pub use gate::{AccessControl, GateError, ProposalId, VoteChoice, VoteRecord};
pub use issuer::{IssueError, Issuer};
pub use registry::{Registry, RegistryError};
pub use stage::CredentialStage;
pub use verifier::{VerificationResult, Verifier, VerifyError};
