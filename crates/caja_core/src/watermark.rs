//! Parsing of `updated_after` watermarks.
//!
//! Clients poll with the `sync_timestamp` the server handed back on the
//! previous listing, so the comparison is strictly greater-than: a
//! record stamped exactly at the watermark was already included in the
//! response that produced it.

use chrono::{DateTime, Utc};

/// Parses an `updated_after` query value.
///
/// Accepts RFC 3339 / ISO 8601 timestamps ("2024-01-01T10:00:00Z") and
/// Unix epoch seconds, including fractional ("1704103200.5"). Anything
/// unparseable yields `None`, which callers treat as "no watermark" and
/// answer with the full active set.
pub fn parse_updated_after(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let seconds: f64 = trimmed.parse().ok()?;
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(whole, nanos)
}

/// Returns true if `updated_at` is strictly after the watermark, or if
/// no watermark was given.
pub fn is_after(updated_at: DateTime<Utc>, watermark: Option<DateTime<Utc>>) -> bool {
    match watermark {
        Some(mark) => updated_at > mark,
        None => true,
    }
}
