//! Wall-clock helpers.
//!
//! All timestamps in committee state are epoch milliseconds. The clock itself
//! is owned by the caller and passed in as `now`, which keeps every state
//! transition deterministic under test.

/// Milliseconds since the Unix epoch.
pub type EpochMillis = i64;

/// Timestamps below this value are taken to be epoch *seconds*.
pub const EPOCH_SECONDS_THRESHOLD: i64 = 1_000_000_000_000;

/// Normalize a timestamp that may have been written in epoch seconds.
pub fn normalize_epoch_ms(value: i64) -> EpochMillis {
    if value < EPOCH_SECONDS_THRESHOLD {
        value.saturating_mul(1000)
    } else {
        value
    }
}

/// Latest timestamp accepted from stored data (end of the year 9999).
pub const MAX_EPOCH_MS: EpochMillis = 253_402_300_799_999;

/// A stored timestamp as epoch milliseconds, or `None` when it is negative
/// or too far in the future to be a real moment.
pub fn checked_epoch_ms(value: i64) -> Option<EpochMillis> {
    let ms = normalize_epoch_ms(value);
    (0..=MAX_EPOCH_MS).contains(&ms).then_some(ms)
}
