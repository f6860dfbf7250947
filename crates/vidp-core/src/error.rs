//! # Validation Errors
//!
//! Structured errors for domain-primitive construction. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Errors from validating domain primitives at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The DID string is not a valid `did:vidp:<64 hex chars>` URI or a
    /// bare 64-character hex identifier.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// A hex-encoded field failed to decode.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    /// A digest string did not match `<algorithm>:<64 hex chars>`.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// A timestamp carried a non-UTC offset.
    #[error("non-UTC timestamp rejected: {0}")]
    NonUtcTimestamp(String),
}
