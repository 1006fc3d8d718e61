//! Live calculation: open-ended, from a start timestamp up to `now`.

use crate::core::calculator::{deduct, expected};
use crate::models::WorkBalanceResult;
use crate::utils::time::minutes_between;

/// Balance of a shift still in progress.
///
/// `manual_break_minutes` is the pause accumulated so far, ongoing pause
/// included. A `now` before `start_ms` (clock skew) counts as zero gross time.
/// Calling this twice with the same inputs yields the same result.
pub fn calculate_live_work_balance(
    start_ms: i64,
    now_ms: i64,
    daily_target_minutes: i64,
    manual_break_minutes: i64,
) -> WorkBalanceResult {
    let gross = minutes_between(start_ms, now_ms);
    let d = deduct(gross, manual_break_minutes, daily_target_minutes);

    WorkBalanceResult {
        gross_worked_minutes: gross,
        mandatory_break_minutes: d.mandatory,
        manual_break_minutes: d.manual,
        effective_worked_minutes: d.effective,
        balance_minutes: d.balance,
        daily_target_minutes: d.target,
        expected_end_timestamp: expected::expected_end_timestamp(start_ms, &d),
    }
}
