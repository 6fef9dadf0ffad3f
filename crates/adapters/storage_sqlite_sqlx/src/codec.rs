//! Column encodings shared by the repositories.
//!
//! Timestamps are stored as fixed-width RFC 3339 text (nanosecond
//! precision, `Z` suffix) so lexical order equals chronological order and
//! values round-trip exactly.

use chrono::{DateTime, SecondsFormat, Utc};
use depot_domain::fault::FaultStatus;
use depot_domain::time::Timestamp;
use depot_domain::user::UserRight;

pub(crate) fn encode_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_timestamp(raw: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn decode_right(level: i64) -> Result<UserRight, sqlx::Error> {
    UserRight::from_level(level)
        .ok_or_else(|| sqlx::Error::Decode(format!("unknown right level {level}").into()))
}

pub(crate) fn decode_status(raw: i64) -> Result<FaultStatus, sqlx::Error> {
    FaultStatus::try_from(raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
