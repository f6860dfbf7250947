//! # Issuance Events
//!
//! [`IssuedEvent`] is the append-only notification record emitted once per
//! successful issuance. [`IssuanceLog`] owns the ordered event sequence;
//! the registry exposes it to external indexers, which may independently
//! persist `(did, hash)` pairs off-process. Durability of those consumers
//! is not this system's concern.
//!
//! Events are ordered by issuance call order. The `sequence` field makes
//! the ordering observable and lets a consumer resume from the last
//! sequence it has seen.

use serde::{Deserialize, Serialize};

use vidp_core::{Did, Timestamp};

/// Notification record for a single credential issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedEvent {
    /// Zero-based position in the issuance log.
    pub sequence: u64,
    /// DID URI of the credential holder (`did:vidp:<hex>`).
    pub did_uri: String,
    /// When the issuance happened.
    pub issued_at: Timestamp,
}

/// Append-only log of issuance events.
///
/// Created once by [`IssuanceLog::new()`] when the event sink is
/// initialized; there is no truncation or teardown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceLog {
    admin: Did,
    events: Vec<IssuedEvent>,
}

impl IssuanceLog {
    /// Create an empty log owned by the given admin identity.
    pub fn new(admin: Did) -> Self {
        Self {
            admin,
            events: Vec::new(),
        }
    }

    /// The admin identity that initialized the sink.
    pub fn admin(&self) -> &Did {
        &self.admin
    }

    /// Append an event for the given holder URI, assigning the next
    /// sequence number. Returns the appended event.
    pub fn append(&mut self, did_uri: String, issued_at: Timestamp) -> IssuedEvent {
        let event = IssuedEvent {
            sequence: self.events.len() as u64,
            did_uri,
            issued_at,
        };
        self.events.push(event.clone());
        event
    }

    /// All events, in issuance order.
    pub fn events(&self) -> &[IssuedEvent] {
        &self.events
    }

    /// Events with `sequence >= from`, for consumers resuming a read.
    pub fn since(&self, from: u64) -> Vec<IssuedEvent> {
        self.events
            .iter()
            .filter(|e| e.sequence >= from)
            .cloned()
            .collect()
    }

    /// Number of events appended so far.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether any events have been appended.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
