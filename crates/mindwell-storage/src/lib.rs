//! mindwell-storage
//!
//! SQLite persistence: pool management, schema creation, and one repository
//! per entity. Every query is scoped by the owning user id.

pub mod assessments;
pub mod conversations;
pub mod diaries;
pub mod error;
pub mod pool;
pub mod users;

use error::StorageError;

/// Timestamps are persisted as integer milliseconds since the Unix epoch,
/// so range filters and per-day grouping stay plain integer arithmetic.
pub(crate) fn to_millis(ts: jiff::Timestamp) -> i64 {
    ts.as_millisecond()
}

pub(crate) fn from_millis(ms: i64) -> Result<jiff::Timestamp, StorageError> {
    jiff::Timestamp::from_millisecond(ms)
        .map_err(|e| StorageError::Corrupt(format!("bad stored timestamp {ms}: {e}")))
}
