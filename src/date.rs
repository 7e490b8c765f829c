//! Order date parsing.
//!
//! Upstream dates look like `"Feb 11, 10:25 am"`: no year, 12-hour clock. The year is
//! inferred from `now`; a date that would land in the future is moved back one year.
//! Anything that fails the pattern or calendar checks is unparseable (`None`), never a panic.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use regex::Regex;
use std::sync::LazyLock;

static ORDER_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"(\w+)\s+(\d+),\s+(\d+):(\d+)\s+(\w+)") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Zero-based month index for a three-letter abbreviation (`"Jan"` → 0). Case-sensitive.
pub fn month_index(abbreviation: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbreviation)
        .map(|i| i as u32)
}

fn unparseable(input: &str, reason: &str) -> Option<NaiveDateTime> {
    warn!("unparseable order date {:?}: {}", input, reason);
    None
}

/// Parses an order date relative to `now`.
///
/// Returns `None` when the string does not match `<Mon> <day>, <h>:<mm> <am|pm>`, names an
/// unknown month, has a day outside 1..=31 or a time outside the clock, or names a day
/// that does not exist in the inferred year (`"Feb 30"`, Feb 29 outside a leap year).
pub fn parse_order_date(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let Some(caps) = ORDER_DATE_RE.captures(input) else {
        return unparseable(input, "does not match expected format");
    };
    let Some(month0) = month_index(&caps[1]) else {
        return unparseable(input, "invalid month");
    };
    let day: u32 = match caps[2].parse() {
        Ok(d) if (1..=31).contains(&d) => d,
        _ => return unparseable(input, "invalid day"),
    };
    let (Ok(mut hour), Ok(minute)) = (caps[3].parse::<u32>(), caps[4].parse::<u32>()) else {
        return unparseable(input, "invalid time");
    };
    match caps[5].to_lowercase().as_str() {
        "am" if hour == 12 => hour = 0,
        "pm" if hour < 12 => hour += 12,
        "am" | "pm" => {}
        _ => return unparseable(input, "expected am or pm"),
    }
    let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
        return unparseable(input, "invalid time");
    };

    let year = now.year();
    let Some(date) = NaiveDate::from_ymd_opt(year, month0 + 1, day) else {
        return unparseable(input, "invalid calendar date");
    };
    let parsed = date.and_time(time);
    if parsed <= now {
        return Some(parsed);
    }
    match NaiveDate::from_ymd_opt(year - 1, month0 + 1, day) {
        Some(previous) => Some(previous.and_time(time)),
        None => unparseable(input, "invalid calendar date"),
    }
}

/// Local wall-clock time, the `now` used outside tests.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Formats a timestamp in the upstream order date style, e.g. `"Mar 5, 2:07 pm"`.
pub fn format_order_date(at: NaiveDateTime) -> String {
    at.format("%b %-d, %-I:%M %P").to_string()
}
