//! # Registry — Owned Pipeline State
//!
//! [`Registry`] is the single owned service instance holding all pipeline
//! state: the credential store, the DID-keyed verification results, the
//! proof cache, the per-DID stage map, and the init-once event sink slot.
//!
//! It deliberately replaces the ambient-global model (fixed-address
//! singletons, lazily created on first write) with an explicitly
//! constructed value shared via `Arc`: initialization is a visible call
//! that fails loudly on re-invocation instead of being skipped silently.
//!
//! ## Concurrency
//!
//! Keyed stores are `DashMap`s; insert-once operations go through the
//! entry API so the read-validate-insert sequence runs under one shard
//! lock (no TOCTOU window). The event sink is a `parking_lot::RwLock`
//! around an `Option<IssuanceLog>`; issuance holds the write guard for the
//! whole credential-insert + event-append sequence, which is what makes
//! each `issue` call all-or-nothing.

use dashmap::DashMap;
use parking_lot::{RwLock, RwLockWriteGuard};
use thiserror::Error;

use vidp_core::Did;
use vidp_vc::{IssuanceLog, IssuedEvent, VerifiableCredential};

use crate::cache::CachedProof;
use crate::stage::CredentialStage;
use crate::verifier::VerificationResult;

/// Errors from registry lifecycle operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The event sink has not been initialized.
    #[error("event sink is not initialized")]
    Uninitialized,

    /// The event sink was already initialized by {admin}.
    #[error("event sink already initialized by {admin}")]
    AlreadyInitialized {
        /// URI of the admin identity that performed the first initialization.
        admin: String,
    },
}

/// Owned pipeline state: credential store, verification results, proof
/// cache, stage map, and the issuance event sink.
pub struct Registry {
    credentials: DashMap<Did, VerifiableCredential>,
    results: DashMap<Did, VerificationResult>,
    proofs: DashMap<Did, CachedProof>,
    stages: DashMap<Did, CredentialStage>,
    event_sink: RwLock<Option<IssuanceLog>>,
}

impl Registry {
    /// Create an empty registry. No event sink exists until
    /// [`Registry::init_event_sink()`] is called.
    pub fn new() -> Self {
        Self {
            credentials: DashMap::new(),
            results: DashMap::new(),
            proofs: DashMap::new(),
            stages: DashMap::new(),
            event_sink: RwLock::new(None),
        }
    }

    // ── Event sink ──────────────────────────────────────────────────

    /// Initialize the issuance event sink. Must be called exactly once,
    /// before any issuance.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyInitialized`] on a second call.
    pub fn init_event_sink(&self, admin: Did) -> Result<(), RegistryError> {
        let mut slot = self.event_sink.write();
        if let Some(existing) = slot.as_ref() {
            return Err(RegistryError::AlreadyInitialized {
                admin: existing.admin().uri(),
            });
        }
        tracing::info!(admin = %admin, "event sink initialized");
        *slot = Some(IssuanceLog::new(admin));
        Ok(())
    }

    /// Whether the event sink has been initialized.
    pub fn event_sink_initialized(&self) -> bool {
        self.event_sink.read().is_some()
    }

    /// All issuance events, in issuance order. Empty if the sink has not
    /// been initialized.
    pub fn events(&self) -> Vec<IssuedEvent> {
        self.event_sink
            .read()
            .as_ref()
            .map(|log| log.events().to_vec())
            .unwrap_or_default()
    }

    /// Issuance events with `sequence >= from`, for an external indexer
    /// resuming a read.
    pub fn events_since(&self, from: u64) -> Vec<IssuedEvent> {
        self.event_sink
            .read()
            .as_ref()
            .map(|log| log.since(from))
            .unwrap_or_default()
    }

    /// Write access to the event sink slot, held by the issuer across the
    /// whole issuance sequence.
    pub(crate) fn event_sink_mut(&self) -> RwLockWriteGuard<'_, Option<IssuanceLog>> {
        self.event_sink.write()
    }

    // ── Credential store ────────────────────────────────────────────

    /// Look up the credential for a DID.
    pub fn credential(&self, did: &Did) -> Option<VerifiableCredential> {
        self.credentials.get(did).map(|r| r.value().clone())
    }

    /// Number of issued credentials.
    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    pub(crate) fn credentials(&self) -> &DashMap<Did, VerifiableCredential> {
        &self.credentials
    }

    // ── Verification results ────────────────────────────────────────

    /// Look up the verification result for a DID.
    pub fn verification_result(&self, did: &Did) -> Option<VerificationResult> {
        self.results.get(did).map(|r| r.value().clone())
    }

    /// Record a verification result, keyed by DID. Re-verification of the
    /// same DID replaces the previous result; results for different DIDs
    /// never collide.
    pub(crate) fn record_verification(&self, did: Did, result: VerificationResult) {
        self.results.insert(did, result);
    }

    // ── Proof cache ─────────────────────────────────────────────────

    /// Look up the cached proof for a DID.
    pub fn cached_proof(&self, did: &Did) -> Option<CachedProof> {
        self.proofs.get(did).map(|r| r.value().clone())
    }

    pub(crate) fn proofs(&self) -> &DashMap<Did, CachedProof> {
        &self.proofs
    }

    // ── Stage map ───────────────────────────────────────────────────

    /// The pipeline stage the DID has reached.
    pub fn stage_of(&self, did: &Did) -> CredentialStage {
        self.stages
            .get(did)
            .map(|r| *r.value())
            .unwrap_or(CredentialStage::Unissued)
    }

    /// Advance the DID's stage monotonically: a lower target than the
    /// current stage is a no-op.
    pub(crate) fn advance_stage(&self, did: &Did, stage: CredentialStage) {
        self.stages
            .entry(*did)
            .and_modify(|current| {
                if stage > *current {
                    *current = stage;
                }
            })
            .or_insert(stage);
    }

    /// Pull the DID's stage back to `stage` if it is currently further
    /// along. Used only by proof invalidation.
    pub(crate) fn demote_stage(&self, did: &Did, stage: CredentialStage) {
        if let Some(mut current) = self.stages.get_mut(did) {
            if *current > stage {
                *current = stage;
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("credentials", &self.credentials.len())
            .field("results", &self.results.len())
            .field("proofs", &self.proofs.len())
            .field("event_sink_initialized", &self.event_sink_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Did {
        Did::from_bytes([0xad; 32])
    }

    #[test]
    fn init_event_sink_is_once_only() {
        let registry = Registry::new();
        assert!(!registry.event_sink_initialized());

        registry.init_event_sink(admin()).expect("first init");
        assert!(registry.event_sink_initialized());

        let second = registry.init_event_sink(Did::from_bytes([1u8; 32]));
        assert!(matches!(
            second,
            Err(RegistryError::AlreadyInitialized { .. })
        ));
    }

    #[test]
    fn events_empty_before_init() {
        let registry = Registry::new();
        assert!(registry.events().is_empty());
        assert!(registry.events_since(0).is_empty());
    }

    #[test]
    fn stage_defaults_to_unissued() {
        let registry = Registry::new();
        let did = Did::from_bytes([5u8; 32]);
        assert_eq!(registry.stage_of(&did), CredentialStage::Unissued);
    }

    #[test]
    fn advance_stage_is_monotonic() {
        let registry = Registry::new();
        let did = Did::from_bytes([5u8; 32]);

        registry.advance_stage(&did, CredentialStage::Cached);
        assert_eq!(registry.stage_of(&did), CredentialStage::Cached);

        // Lower target is a no-op.
        registry.advance_stage(&did, CredentialStage::Issued);
        assert_eq!(registry.stage_of(&did), CredentialStage::Cached);
    }

    #[test]
    fn demote_stage_only_pulls_back() {
        let registry = Registry::new();
        let did = Did::from_bytes([5u8; 32]);

        registry.advance_stage(&did, CredentialStage::Authorized);
        registry.demote_stage(&did, CredentialStage::Verified);
        assert_eq!(registry.stage_of(&did), CredentialStage::Verified);

        // Demoting to a later stage than current is a no-op.
        registry.demote_stage(&did, CredentialStage::Cached);
        assert_eq!(registry.stage_of(&did), CredentialStage::Verified);
    }
}
