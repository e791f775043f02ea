//! Relative-time formatting.
//!
//! Formats a past instant as a coarse human string ("just now",
//! "3 hours ago"). Month and year buckets use 30-day and 365-day
//! approximations, not calendar arithmetic.

use std::time::{Duration, SystemTime};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Format how long ago `then` was, relative to the wall clock.
///
/// A `then` in the future formats as "just now".
pub fn relative_time_string(then: SystemTime) -> String {
    let elapsed = SystemTime::now()
        .duration_since(then)
        .unwrap_or(Duration::ZERO);
    format_elapsed(elapsed)
}

/// Format an elapsed duration using the fixed bucket table.
///
/// Buckets are evaluated by ascending magnitude, first match wins:
/// under a minute, minutes, hours, days, 30-day months, 365-day years.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < MINUTE {
        return "just now".to_string();
    }
    let minutes = secs / MINUTE;
    if minutes < 60 {
        return pluralize(minutes, "minute");
    }
    let hours = secs / HOUR;
    if hours < 24 {
        return pluralize(hours, "hour");
    }
    let days = secs / DAY;
    if days < 30 {
        return pluralize(days, "day");
    }
    let months = secs / MONTH;
    if months < 12 {
        return pluralize(months, "month");
    }
    pluralize(secs / YEAR, "year")
}

fn pluralize(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
