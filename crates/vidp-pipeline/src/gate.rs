// SPDX-License-Identifier: BUSL-1.1
//! # Proof-Gated Access Control
//!
//! [`AccessControl`] gates a protected action on the presence of a cached
//! proof. `authorize` is a pure read of the proof cache; `submit_vote` is
//! the gated action — recording a DAO-style ballot — and aborts with
//! `Unauthorized` when no proof is cached for the acting DID.
//!
//! Authorization is correctness-by-presence: the gate trusts that a cached
//! entry exists, not that its digest matches a fresh recomputation.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use vidp_core::{Did, Timestamp};

use crate::registry::Registry;
use crate::stage::CredentialStage;

/// Errors from gated actions.
#[derive(Error, Debug)]
pub enum GateError {
    /// No cached proof exists for the acting DID.
    #[error("unauthorized: no cached proof for {0}")]
    Unauthorized(String),

    /// The DID has already voted on the proposal.
    #[error("duplicate vote by {did} on proposal {proposal}")]
    DuplicateVote {
        /// The proposal voted on.
        proposal: ProposalId,
        /// URI of the voting DID.
        did: String,
    },
}

/// Unique identifier for a proposal put to a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(Uuid);

impl ProposalId {
    /// Create a new random proposal identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a proposal identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProposalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "proposal:{}", self.0)
    }
}

/// A ballot choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    /// In favor.
    For,
    /// Opposed.
    Against,
    /// Present but not taking a side.
    Abstain,
}

/// A recorded vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Unique identifier of this vote.
    pub vote_id: Uuid,
    /// The proposal voted on.
    pub proposal: ProposalId,
    /// DID whose cached proof authorized the vote.
    pub voter: Did,
    /// The identity that submitted the call.
    pub submitted_by: Did,
    /// The ballot choice.
    pub choice: VoteChoice,
    /// When the vote was recorded.
    pub cast_at: Timestamp,
}

/// The access-control component: proof-gated voting.
pub struct AccessControl {
    registry: Arc<Registry>,
    votes: DashMap<(ProposalId, Did), VoteRecord>,
}

impl AccessControl {
    /// Create an access-control gate over the shared registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            votes: DashMap::new(),
        }
    }

    /// Whether a cached proof exists for `did`.
    pub fn authorize(&self, did: &Did) -> bool {
        self.registry.cached_proof(did).is_some()
    }

    /// Record a vote on `proposal` by `did`. One vote per DID per
    /// proposal.
    ///
    /// # Errors
    ///
    /// - [`GateError::Unauthorized`] if no cached proof exists for `did`.
    /// - [`GateError::DuplicateVote`] if the DID already voted on the
    ///   proposal.
    pub fn submit_vote(
        &self,
        caller: &Did,
        did: &Did,
        proposal: ProposalId,
        choice: VoteChoice,
    ) -> Result<VoteRecord, GateError> {
        if !self.authorize(did) {
            return Err(GateError::Unauthorized(did.uri()));
        }

        match self.votes.entry((proposal, *did)) {
            Entry::Occupied(_) => Err(GateError::DuplicateVote {
                proposal,
                did: did.uri(),
            }),
            Entry::Vacant(slot) => {
                let record = VoteRecord {
                    vote_id: Uuid::new_v4(),
                    proposal,
                    voter: *did,
                    submitted_by: *caller,
                    choice,
                    cast_at: Timestamp::now(),
                };
                slot.insert(record.clone());
                self.registry.advance_stage(did, CredentialStage::Authorized);
                tracing::info!(did = %did, proposal = %proposal, "vote recorded");
                Ok(record)
            }
        }
    }

    /// All votes recorded for a proposal.
    pub fn votes_for(&self, proposal: &ProposalId) -> Vec<VoteRecord> {
        self.votes
            .iter()
            .filter(|entry| entry.key().0 == *proposal)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl std::fmt::Debug for AccessControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessControl")
            .field("vote_count", &self.votes.len())
            .finish()
    }
}
