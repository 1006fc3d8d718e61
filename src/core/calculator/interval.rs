//! Closed-interval calculation over two "HH:MM" clock times.
//!
//! A shift never spans more than 24 hours, so an end time earlier than the
//! start time unambiguously means "ends on the next calendar day".

use crate::core::calculator::{breaks, deduct, expected};
use crate::models::ShiftBalance;
use crate::utils::time::{MINUTES_PER_DAY, parse_time_to_minutes};

pub fn calculate_gross_minutes(start_time: &str, end_time: &str) -> i64 {
    let diff =
        parse_time_to_minutes(end_time).saturating_sub(parse_time_to_minutes(start_time));
    if diff < 0 { diff.saturating_add(MINUTES_PER_DAY) } else { diff }
}

pub fn is_overnight_shift(start_time: &str, end_time: &str) -> bool {
    parse_time_to_minutes(end_time) < parse_time_to_minutes(start_time)
}

/// Gross minus the total break, floored at 0.
pub fn calculate_worked_minutes(start_time: &str, end_time: &str, break_minutes: i64) -> i64 {
    let gross = calculate_gross_minutes(start_time, end_time);
    gross.saturating_sub(breaks::normalize_minutes(break_minutes)).max(0)
}

/// Full figures for a finished shift.
pub fn calculate_shift_balance(
    start_time: &str,
    end_time: &str,
    daily_target_minutes: i64,
    extra_pause_minutes: i64,
) -> ShiftBalance {
    let gross = calculate_gross_minutes(start_time, end_time);
    let d = deduct(gross, extra_pause_minutes, daily_target_minutes);

    ShiftBalance {
        gross_worked_minutes: gross,
        overnight: is_overnight_shift(start_time, end_time),
        mandatory_break_minutes: d.mandatory,
        manual_break_minutes: d.manual,
        break_minutes: d.mandatory.saturating_add(d.manual),
        effective_worked_minutes: d.effective,
        balance_minutes: d.balance,
        daily_target_minutes: d.target,
        expected_end_minutes: parse_time_to_minutes(start_time)
            .saturating_add(expected::expected_offset_minutes(&d)),
    }
}
