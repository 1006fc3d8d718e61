//! Formatting utilities used by the CLI and the live display.

use crate::utils::time::format_minutes_hhmm;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Signed balance, e.g. "+1:05", "-0:07"; exactly zero renders as "0:00".
pub fn format_balance(mins: i64) -> String {
    if mins == 0 {
        return "0:00".to_string();
    }

    let sign = if mins < 0 { "-" } else { "+" };
    let abs_m = mins.abs();
    format!("{}{}:{:02}", sign, abs_m / 60, abs_m % 60)
}

/// "H:MM:SS", negative input clamps to zero.
pub fn format_seconds(total_seconds: i64) -> String {
    let s = total_seconds.max(0);
    format!("{}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Pause counter as "M:SS".
pub fn format_pause(total_ms: i64) -> String {
    let ms = total_ms.max(0);
    format!("{}:{:02}", ms / 60_000, (ms % 60_000) / 1000)
}

/// Share of the daily target already worked, capped at 100.
/// A zero target counts as reached.
pub fn progress_percent(worked_minutes: i64, target_minutes: i64) -> f64 {
    if target_minutes <= 0 {
        return 100.0;
    }
    (worked_minutes.max(0) as f64 / target_minutes as f64 * 100.0).min(100.0)
}

/// Human readable status line for a balance.
pub fn remaining_text(balance_minutes: i64) -> String {
    match balance_minutes {
        b if b < 0 => format!("{} left to work", format_minutes_hhmm(b.abs())),
        0 => "Target reached".to_string(),
        b => format!("{} overtime", format_minutes_hhmm(b)),
    }
}

/// Times of a shift, marking shifts that end on the following day.
pub fn shift_span(start: &str, end: &str, overnight: bool) -> String {
    if overnight {
        format!("{start} - {end} (+1 day)")
    } else {
        format!("{start} - {end}")
    }
}

static ANSI_RE: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
    regex::Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ansi regex")
});

/// Removes ANSI color sequences, for width calculations.
pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Printable width of a string that may carry ANSI sequences.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}
