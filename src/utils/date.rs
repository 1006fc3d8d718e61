//! Date keys ("YYYY-MM-DD"), calendar arithmetic and display formatting.

use crate::utils::time::{parse_leading_int, to_local};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A calendar date in its canonical "YYYY-MM-DD" form.
///
/// Backed by a plain `NaiveDate`, so whole-day shifts never meet DST or a
/// midnight rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Local date of an epoch-ms timestamp.
    pub fn from_timestamp(ts_ms: i64) -> Self {
        Self(to_local(ts_ms).date_naive())
    }

    /// Shifted by `days` calendar days; `None` only past chrono's range.
    pub fn add_days(&self, days: i64) -> Option<Self> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted.map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_date_key(&self.0))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date_key(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date key '{raw}'")))
    }
}

/// Zero-padded "YYYY-MM-DD".
pub fn format_date_key(date: &NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse "YYYY-MM-DD".
///
/// Each part is read like `parseInt`; a missing, non-numeric or zero part makes
/// the key invalid. Month and day overflow roll forward the way a calendar
/// constructor does ("2026-02-30" is 2026-03-02, "2025-13-01" is 2026-01-01).
pub fn parse_date_key(key: &str) -> Option<DateKey> {
    let mut parts = key.split('-').map(parse_leading_int);
    let year = parts.next().flatten()?;
    let month = parts.next().flatten()?;
    let day = parts.next().flatten()?;

    if year == 0 || month == 0 || day == 0 {
        return None;
    }

    let base = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?;
    let with_month = shift_months(base, month - 1)?;
    let date = if day > 0 {
        with_month.checked_add_days(Days::new((day - 1) as u64))?
    } else {
        with_month.checked_sub_days(Days::new((1 - day) as u64))?
    };

    Some(DateKey(date))
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let n = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(n)
    } else {
        date.checked_sub_months(n)
    }
}

/// `key` shifted by `days`; an unparseable key is returned untouched.
pub fn add_days_to_date_key(key: &str, days: i64) -> String {
    match parse_date_key(key).and_then(|d| d.add_days(days)) {
        Some(d) => d.to_string(),
        None => key.to_string(),
    }
}

/// Short weekday plus day and month, e.g. "Mo., 16.02." for `de-DE`.
/// An unparseable key is echoed back as-is.
pub fn format_date_for_display(key: &str, locale: &str) -> String {
    let Some(d) = parse_date_key(key) else {
        return key.to_string();
    };
    let date = d.date();
    let wd = date.weekday();
    let (day, month) = (date.day(), date.month());
    let locale = locale.trim().to_ascii_lowercase().replace('_', "-");

    if locale.starts_with("de") {
        format!("{}, {day:02}.{month:02}.", weekday_de(wd))
    } else if locale == "en-us" {
        format!("{}, {month:02}/{day:02}", weekday_en(wd))
    } else if locale.starts_with("en") {
        format!("{} {day:02}/{month:02}", weekday_en(wd))
    } else if locale.starts_with("it") {
        format!("{} {day:02}/{month:02}", weekday_it(wd))
    } else if locale.starts_with("fr") {
        format!("{}. {day:02}/{month:02}", weekday_fr(wd))
    } else {
        format!("{}, {day:02}.{month:02}", weekday_en(wd))
    }
}

fn weekday_de(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Mo.",
        Weekday::Tue => "Di.",
        Weekday::Wed => "Mi.",
        Weekday::Thu => "Do.",
        Weekday::Fri => "Fr.",
        Weekday::Sat => "Sa.",
        Weekday::Sun => "So.",
    }
}

fn weekday_en(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn weekday_it(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "lun",
        Weekday::Tue => "mar",
        Weekday::Wed => "mer",
        Weekday::Thu => "gio",
        Weekday::Fri => "ven",
        Weekday::Sat => "sab",
        Weekday::Sun => "dom",
    }
}

fn weekday_fr(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "lun",
        Weekday::Tue => "mar",
        Weekday::Wed => "mer",
        Weekday::Thu => "jeu",
        Weekday::Fri => "ven",
        Weekday::Sat => "sam",
        Weekday::Sun => "dim",
    }
}

/// Inclusive bounds for a period expression:
/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `start:end` in the same format.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some((start, end)) = p.split_once(':') {
        let (s, _) = single_period_bounds(start.trim())?;
        let (_, e) = single_period_bounds(end.trim())?;
        if e < s {
            return Err(format!("Invalid period (end before start): {p}"));
        }
        return Ok((s, e));
    }
    single_period_bounds(p.trim())
}

fn single_period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| format!("Invalid period: {p}"))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {p}"))
}
