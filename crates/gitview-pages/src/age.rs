//! Age and date cells.

use chrono::{DateTime, FixedOffset, Utc};
use gitview_history::Timestamp;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Cutoff used by the log view: ages beyond two weeks show as a date.
pub const TWO_WEEKS: i64 = 2 * WEEK;

/// Relative age for recent timestamps, short date beyond `max_relative`
/// seconds (a negative cutoff disables the date fallback).
pub fn format_age(now: i64, when: Timestamp, max_relative: i64) -> String {
    let secs = (now - when.secs).max(0);
    if max_relative >= 0 && secs > max_relative {
        return short_date(when);
    }
    if secs < 2 * HOUR {
        return format!("{} min.", secs / MINUTE);
    }
    if secs < 2 * DAY {
        return format!("{} hours", secs / HOUR);
    }
    if secs < 2 * WEEK {
        return format!("{} days", secs / DAY);
    }
    if secs < 2 * MONTH {
        return format!("{} weeks", secs / WEEK);
    }
    if secs < 2 * YEAR {
        return format!("{} months", secs / MONTH);
    }
    format!("{} years", secs / YEAR)
}

/// `YYYY-MM-DD` in the timestamp's own timezone.
pub fn short_date(when: Timestamp) -> String {
    in_zone(when).format("%Y-%m-%d").to_string()
}

/// ISO-8601 date and time with offset, for the tag page.
pub fn iso_datetime(when: Timestamp) -> String {
    in_zone(when).format("%Y-%m-%d %H:%M:%S %z").to_string()
}

fn in_zone(when: Timestamp) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(when.tz_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
    DateTime::from_timestamp(when.secs, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&offset)
}
