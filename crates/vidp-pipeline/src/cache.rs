// SPDX-License-Identifier: BUSL-1.1
//! # Proof Cache
//!
//! [`ProofCache`] persists at most one [`CachedProof`] per DID. `store` is
//! insert-once; the explicit `refresh` and `invalidate` operations are the
//! only update and removal paths, so cache churn is always a visible,
//! auditable call rather than a side effect of re-verification.
//!
//! `contains` is an existence check only — downstream authorization trusts
//! presence, not content. The cached digest is not re-compared against a
//! freshly derived one; callers that need content equality can fetch the
//! proof and compare digests themselves.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vidp_core::{ContentDigest, Did, Timestamp};

use crate::registry::Registry;
use crate::stage::CredentialStage;

/// Errors from proof-cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A proof is already cached for the DID.
    #[error("proof already cached for {0}")]
    AlreadyCached(String),

    /// No proof is cached for the DID.
    #[error("no cached proof for {0}")]
    NotCached(String),
}

/// A cached verification proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedProof {
    /// The proof digest produced by verification.
    pub hash: ContentDigest,
    /// When the proof was cached (UTC, seconds precision).
    pub cached_at: Timestamp,
    /// The identity that performed the caching call.
    pub cached_by: Did,
}

/// The proof-cache component.
pub struct ProofCache {
    registry: Arc<Registry>,
}

impl ProofCache {
    /// Create a proof cache over the shared registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Cache a proof digest for `did`. Insert-once: a second call for the
    /// same DID fails rather than overwriting.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::AlreadyCached`] if a proof already exists.
    pub fn store(
        &self,
        caller: &Did,
        did: &Did,
        hash: ContentDigest,
    ) -> Result<CachedProof, CacheError> {
        match self.registry.proofs().entry(*did) {
            Entry::Occupied(_) => Err(CacheError::AlreadyCached(did.uri())),
            Entry::Vacant(slot) => {
                let proof = CachedProof {
                    hash,
                    cached_at: Timestamp::now(),
                    cached_by: *caller,
                };
                slot.insert(proof.clone());
                self.registry.advance_stage(did, CredentialStage::Cached);
                tracing::info!(did = %did, caller = %caller, "proof cached");
                Ok(proof)
            }
        }
    }

    /// Whether a proof is cached for `did`. Existence only — the cached
    /// digest is not validated against any expected value.
    pub fn contains(&self, did: &Did) -> bool {
        self.registry.cached_proof(did).is_some()
    }

    /// Replace the cached proof for `did` with a fresh digest and
    /// timestamp. Requires an existing entry — refresh is not an upsert.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotCached`] if no proof exists.
    pub fn refresh(
        &self,
        caller: &Did,
        did: &Did,
        hash: ContentDigest,
    ) -> Result<CachedProof, CacheError> {
        let mut entry = self
            .registry
            .proofs()
            .get_mut(did)
            .ok_or_else(|| CacheError::NotCached(did.uri()))?;

        let proof = CachedProof {
            hash,
            cached_at: Timestamp::now(),
            cached_by: *caller,
        };
        *entry = proof.clone();
        tracing::info!(did = %did, caller = %caller, "proof refreshed");
        Ok(proof)
    }

    /// Remove the cached proof for `did`, returning it. Afterward the DID
    /// no longer authorizes; its stage falls back to the last stage still
    /// backed by registry state (normally `Verified`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotCached`] if no proof exists.
    pub fn invalidate(&self, did: &Did) -> Result<CachedProof, CacheError> {
        let (_, proof) = self
            .registry
            .proofs()
            .remove(did)
            .ok_or_else(|| CacheError::NotCached(did.uri()))?;

        let fallback = if self.registry.verification_result(did).is_some() {
            CredentialStage::Verified
        } else if self.registry.credential(did).is_some() {
            CredentialStage::Issued
        } else {
            CredentialStage::Unissued
        };
        self.registry.demote_stage(did, fallback);
        tracing::info!(did = %did, "proof invalidated");
        Ok(proof)
    }
}

impl std::fmt::Debug for ProofCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofCache")
            .field("registry", &self.registry)
            .finish()
    }
}
