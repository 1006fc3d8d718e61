use crate::core::calculator::Deductions;
use crate::utils::time::MS_PER_MINUTE;

/// Expected = target + breaks already incurred (mandatory and manual).
///
/// Breaks are taken as fixed from here on. A shift still below the threshold
/// does not get a future mandatory break projected in.
pub(crate) fn expected_offset_minutes(d: &Deductions) -> i64 {
    d.target.saturating_add(d.mandatory).saturating_add(d.manual)
}

/// Epoch ms at which the target is reached, counted from `start_ms`.
pub(crate) fn expected_end_timestamp(start_ms: i64, d: &Deductions) -> i64 {
    start_ms.saturating_add(expected_offset_minutes(d).saturating_mul(MS_PER_MINUTE))
}
