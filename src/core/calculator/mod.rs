//! Balance calculator.
//!
//! Two entry points share one break policy:
//! - [`interval`]: fixed start/end clock times (historical entries)
//! - [`live`]: a start timestamp up to "now" (the running stopwatch)
//!
//! Every function here is pure and total. Bad numbers are clamped, never
//! reported.

pub mod breaks;
pub mod expected;
pub mod interval;
pub mod live;

pub use breaks::{
    BREAK_AMOUNT_MINUTES, BREAK_THRESHOLD_MINUTES, calculate_break_minutes,
    mandatory_break_minutes,
};
pub use interval::{
    calculate_gross_minutes, calculate_shift_balance, calculate_worked_minutes,
    is_overnight_shift,
};
pub use live::calculate_live_work_balance;

/// Figures shared by both calculations once gross time is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Deductions {
    pub mandatory: i64,
    pub manual: i64,
    pub effective: i64,
    pub balance: i64,
    pub target: i64,
}

/// Applies the break policy and the target to a gross duration.
pub(crate) fn deduct(gross: i64, manual_break: i64, daily_target: i64) -> Deductions {
    let gross = gross.max(0);
    let mandatory = mandatory_break_minutes(gross);
    let manual = breaks::normalize_minutes(manual_break);
    let target = breaks::normalize_minutes(daily_target);

    let effective = gross.saturating_sub(mandatory).saturating_sub(manual).max(0);

    Deductions {
        mandatory,
        manual,
        effective,
        balance: effective - target,
        target,
    }
}
