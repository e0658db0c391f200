//! Timestamp helpers shared by the ledger and the CLI.
//!
//! Every timestamp the ledger writes is a local wall-clock ISO-8601 string
//! with microsecond precision. Keeping one fixed layout means SQL string
//! comparison (`scheduled_at > ?`) orders the same way the clock does, and a
//! user-typed `2099-01-01T00:00:00` sorts correctly against generated values.

use chrono::{Local, NaiveDateTime};

/// `strftime` layout for every generated timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
