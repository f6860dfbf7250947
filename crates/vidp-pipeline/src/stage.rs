//! # Credential Stage Progression
//!
//! Each DID moves through a strictly forward pipeline:
//!
//! ```text
//! Unissued ──▶ Issued ──▶ Verified ──▶ Cached ──▶ Authorized
//! ```
//!
//! Failed preconditions abort the triggering call without changing the
//! DID's stage. The one sanctioned reverse edge is proof invalidation,
//! which returns a `Cached`/`Authorized` DID to `Verified`.
//!
//! ## Design Decision
//!
//! The stage is an ordered enum advanced monotonically rather than a
//! typestate chain: the pipeline's stores are keyed by DID at runtime, so
//! there is no compile-time handle per DID for typestate to attach to.
//! The enum's `Ord` makes "never move backward" a one-line comparison.

use serde::{Deserialize, Serialize};

/// The pipeline stage a DID has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CredentialStage {
    /// No credential has been issued for the DID.
    Unissued = 0,
    /// A credential record exists.
    Issued = 1,
    /// The credential signature has been verified and a result recorded.
    Verified = 2,
    /// A proof digest is cached for the DID.
    Cached = 3,
    /// The DID has exercised a proof-gated action.
    Authorized = 4,
}

impl CredentialStage {
    /// The numeric stage (0-4).
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// The next stage in the pipeline, if any.
    pub fn next(&self) -> Option<CredentialStage> {
        match self {
            Self::Unissued => Some(Self::Issued),
            Self::Issued => Some(Self::Verified),
            Self::Verified => Some(Self::Cached),
            Self::Cached => Some(Self::Authorized),
            Self::Authorized => None,
        }
    }

    /// Whether this is the terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// The stage name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unissued => "unissued",
            Self::Issued => "issued",
            Self::Verified => "verified",
            Self::Cached => "cached",
            Self::Authorized => "authorized",
        }
    }
}

impl std::fmt::Display for CredentialStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
