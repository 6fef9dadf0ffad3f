//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for fault records, event ranges and check-ins.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Reject a range whose `end` falls before its `start`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeRange`] naming `what`.
pub fn ensure_ordered(
    what: &'static str,
    start: Timestamp,
    end: Timestamp,
) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::InvalidTimeRange(what));
    }
    Ok(())
}
