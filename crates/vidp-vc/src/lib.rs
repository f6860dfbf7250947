//! # vidp-vc — Verifiable Credentials
//!
//! Defines the credential record and the issuance notification types:
//!
//! - **Credential** ([`credential`]): the [`VerifiableCredential`] record
//!   binding a holder DID to signed claims.
//!
//! - **Events** ([`events`]): [`IssuedEvent`] and the append-only
//!   [`IssuanceLog`] consumed by external indexers.
//!
//! ## Crate Policy
//!
//! - Depends on `vidp-core` and `vidp-crypto` internally.
//! - Claim payloads are opaque; this crate never interprets their contents.

pub mod credential;
pub mod events;

pub use credential::VerifiableCredential;
pub use events::{IssuanceLog, IssuedEvent};
