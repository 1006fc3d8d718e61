use serde::Serialize;

/// Result of the live calculation (start timestamp → now).
/// Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkBalanceResult {
    pub gross_worked_minutes: i64,
    pub mandatory_break_minutes: i64,
    pub manual_break_minutes: i64,
    pub effective_worked_minutes: i64,
    pub balance_minutes: i64,
    pub daily_target_minutes: i64,
    /// Epoch ms at which the target is reached with the breaks incurred so far.
    pub expected_end_timestamp: i64,
}

/// Result of the closed-interval calculation (two clock times).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftBalance {
    pub gross_worked_minutes: i64,
    pub overnight: bool,
    pub mandatory_break_minutes: i64,
    pub manual_break_minutes: i64,
    pub break_minutes: i64,
    pub effective_worked_minutes: i64,
    pub balance_minutes: i64,
    pub daily_target_minutes: i64,
    /// Minutes after the shift date's midnight; may exceed one day.
    pub expected_end_minutes: i64,
}
