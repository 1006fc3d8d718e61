//! Time utilities: lenient HH:MM parsing, minute arithmetic, local clock helpers.
//!
//! Everything in here is total: malformed input degrades to 0 (or `None` for
//! the explicitly optional parsers) instead of failing. A time tracker must
//! not break a running shift over a formatting glitch.

use chrono::{DateTime, Duration, Local, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MINUTES_PER_DAY: i64 = 24 * 60;
/// Upper bound for a target or break setting: one full day.
pub const MAX_DURATION_MINUTES: i64 = MINUTES_PER_DAY;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<h>\d+)h)?\s*(?:(?P<m>\d+)m(?:in)?)?$").expect("valid duration regex")
});

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<h>\d+):(?P<m>\d{1,2})$").expect("valid clock regex"));

/// Integer parsing with `parseInt` semantics: leading whitespace, an optional
/// sign, then as many ASCII digits as are present. `None` when no digit leads.
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// "HH:MM" → minutes since midnight.
///
/// Missing or non-numeric parts count as 0, so `""`, `"abc"` and `":"` all
/// give 0 and `"8"` gives 480. Values are not range-checked, but a result
/// that does not fit in an `i64` is also 0.
pub fn parse_time_to_minutes(time: &str) -> i64 {
    if time.is_empty() {
        return 0;
    }

    let mut parts = time.split(':');
    let hours = parts.next().and_then(parse_leading_int).unwrap_or(0);
    let minutes = parts.next().and_then(parse_leading_int).unwrap_or(0);

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .unwrap_or(0)
}

/// Strict variant used by the CLI to validate user input before it reaches
/// the lenient core.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Whole minutes between two epoch-ms timestamps, never negative.
pub fn minutes_between(start_ms: i64, end_ms: i64) -> i64 {
    end_ms.saturating_sub(start_ms).max(0) / MS_PER_MINUTE
}

/// Zero-padded "HH:MM"; negative input renders as "00:00", hours may exceed 24.
pub fn format_minutes_hhmm(total_minutes: i64) -> String {
    let m = total_minutes.max(0);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Settings durations: "8h", "7h48m", "45m", "7:48" or a bare minute count.
/// Anything longer than [`MAX_DURATION_MINUTES`] is rejected.
pub fn parse_duration_minutes(input: &str) -> Option<i64> {
    parse_duration_unbounded(input).filter(|m| (0..=MAX_DURATION_MINUTES).contains(m))
}

fn parse_duration_unbounded(input: &str) -> Option<i64> {
    let s = input.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(n) = s.parse::<i64>() {
        return (n >= 0).then_some(n);
    }

    if let Some(caps) = CLOCK_RE.captures(&s) {
        let h: i64 = caps["h"].parse().ok()?;
        let m: i64 = caps["m"].parse().ok()?;
        return h.checked_mul(60)?.checked_add(m);
    }

    let caps = DURATION_RE.captures(&s)?;
    if caps.name("h").is_none() && caps.name("m").is_none() {
        return None;
    }

    let h: i64 = caps.name("h").map_or(Ok(0), |v| v.as_str().parse()).ok()?;
    let m: i64 = caps.name("m").map_or(Ok(0), |v| v.as_str().parse()).ok()?;
    h.checked_mul(60)?.checked_add(m)
}

/// Epoch-ms → local date-time. Out-of-range values collapse to the epoch.
pub fn to_local(ts_ms: i64) -> DateTime<Local> {
    DateTime::from_timestamp_millis(ts_ms)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Local "HH:MM" of an epoch-ms timestamp.
pub fn format_clock(ts_ms: i64) -> String {
    to_local(ts_ms).format("%H:%M").to_string()
}

/// Timestamp for *today* (the local date of `now_ms`) at the given wall-clock
/// minute. Values past 23:59 roll into the next day; values past chrono's
/// range give midnight.
pub fn timestamp_today_at(now_ms: i64, minutes_of_day: i64) -> i64 {
    let midnight = to_local(now_ms).date_naive().and_time(NaiveTime::MIN);
    let naive = Duration::try_minutes(minutes_of_day.max(0))
        .and_then(|d| midnight.checked_add_signed(d))
        .unwrap_or(midnight);

    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}
