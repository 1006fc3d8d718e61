//! Break policy: one fixed mandatory break once the gross duration passes
//! six hours. It is a step, not a rate. Crossing the threshold by a single
//! minute adds the whole break, and staying longer adds nothing more.

/// Gross minutes that must be *exceeded* before the break applies.
pub const BREAK_THRESHOLD_MINUTES: i64 = 360;
/// Size of the mandatory break.
pub const BREAK_AMOUNT_MINUTES: i64 = 30;

/// Negative minute counts are treated as 0.
pub fn normalize_minutes(minutes: i64) -> i64 {
    minutes.max(0)
}

pub fn mandatory_break_minutes(gross_worked_minutes: i64) -> i64 {
    if gross_worked_minutes > BREAK_THRESHOLD_MINUTES {
        BREAK_AMOUNT_MINUTES
    } else {
        0
    }
}

/// Total break stored on an entry: the mandatory part plus any pause taken.
pub fn calculate_break_minutes(gross_worked_minutes: i64, extra_pause_minutes: i64) -> i64 {
    mandatory_break_minutes(gross_worked_minutes)
        .saturating_add(normalize_minutes(extra_pause_minutes))
}
