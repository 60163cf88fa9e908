//! Timestamp precision shared by every persisted record.
//!
//! `PostgreSQL` stores `TIMESTAMPTZ` with microsecond resolution. Records
//! stamp themselves at that resolution so a value read back compares equal
//! to the one written.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Number of fractional-second digits kept on persisted timestamps.
pub const STORED_SUBSEC_DIGITS: u16 = 6;

/// Truncates `instant` to the stored resolution.
#[must_use]
pub fn to_stored_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Reads `clock` at the stored resolution.
#[must_use]
pub fn stored_now(clock: &impl Clock) -> DateTime<Utc> {
    to_stored_precision(clock.utc())
}
