//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines [`Timestamp`], a UTC-only timestamp truncated to seconds
//! precision. Cached-proof timestamps are defined as integer seconds, so
//! sub-second components are dropped at construction and non-UTC inputs are
//! rejected outright — there is no silent conversion that could make the
//! same instant render differently on two hosts.

use chrono::{DateTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::from_unix_seconds()`] — from an integer epoch offset.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// From an integer number of seconds since the Unix epoch.
    ///
    /// Out-of-range inputs (beyond chrono's representable range) are
    /// rejected as invalid rather than clamped.
    pub fn from_unix_seconds(secs: i64) -> Result<Self, ValidationError> {
        match Utc.timestamp_opt(secs, 0) {
            chrono::LocalResult::Single(dt) => Ok(Self(dt)),
            _ => Err(ValidationError::NonUtcTimestamp(format!(
                "unrepresentable epoch seconds: {secs}"
            ))),
        }
    }

    /// Parse an ISO8601 timestamp, rejecting non-UTC offsets.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let dt = DateTime::parse_from_rfc3339(value.trim())
            .map_err(|e| ValidationError::NonUtcTimestamp(format!("{value}: {e}")))?;
        if dt.offset().local_minus_utc() != 0 {
            return Err(ValidationError::NonUtcTimestamp(value.to_string()));
        }
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ` — no sub-seconds, always `Z`.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Access the underlying `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    // with_nanosecond(0) only fails for leap-second inputs; fall back to
    // the original value in that case.
    dt.with_nanosecond(0).unwrap_or(dt)
}
