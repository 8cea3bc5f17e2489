//! Key layout and time formatting for stored records.
//!
//! ```text
//! schedule:<userId>:<YYYY-MM-DD>
//! chat:<userId>:<YYYY-MM-DD>
//! log:<userId>:<YYYY-MM-DDTHH:MM:SS.mmmZ>:<nonce>
//! ```
//!
//! User ids never contain `:` (rejected at validation), so a prefix ending in
//! `<userId>:` cannot match another user's records.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

pub fn schedule_key(user_id: &str, now: DateTime<Utc>) -> String {
    format!("schedule:{user_id}:{}", iso_date(now))
}

pub fn chat_key(user_id: &str, now: DateTime<Utc>) -> String {
    format!("chat:{user_id}:{}", iso_date(now))
}

/// A fresh log key. The nonce keeps two entries written in the same
/// millisecond apart.
pub fn log_key(user_id: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}{}:{}",
        log_prefix(user_id),
        iso_timestamp(now),
        Uuid::new_v4().simple()
    )
}

pub fn log_prefix(user_id: &str) -> String {
    format!("log:{user_id}:")
}

/// UTC calendar date, `YYYY-MM-DD`.
pub fn iso_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Fixed-width UTC timestamp with millisecond precision, so lexicographic
/// order equals chronological order.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
