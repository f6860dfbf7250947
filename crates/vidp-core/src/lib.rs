//! # vidp-core — Foundational Types for the VID Pipeline
//!
//! This crate is the bedrock of the VID Pipeline workspace. It defines the
//! domain primitives that every other crate builds on; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`Did`] and [`Claims`] are
//!    distinct types with validated constructors — no bare strings or byte
//!    vectors for identifiers or claim payloads.
//!
//! 2. **`Claims` is the only hashable/signable input.** Digest computation
//!    and Ed25519 signing accept `&Claims`, never raw `&[u8]`. A digest over
//!    bytes that did not come through the claims type cannot be expressed.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] enforces UTC with seconds
//!    precision, so cached-proof timestamps and issuance times are stable
//!    integers regardless of host timezone.
//!
//! 4. **Algorithm-tagged digests.** [`ContentDigest`] carries a
//!    [`DigestAlgorithm`] tag so every digest in the system is
//!    self-describing.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vidp-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod claims;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use claims::Claims;
pub use digest::{claims_digest, ContentDigest, DigestAlgorithm};
pub use error::ValidationError;
pub use identity::{Did, DID_SCHEME};
pub use temporal::Timestamp;
