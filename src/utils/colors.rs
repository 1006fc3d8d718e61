/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Balance color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_balance(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

/// Wraps a balance string in its color.
pub fn colorize_balance(value: i64, text: &str) -> String {
    format!("{}{}{}", color_for_balance(value), text, RESET)
}

/// Timer phase color: running green, paused yellow, stopped grey.
pub fn color_for_phase(running: bool, paused: bool) -> &'static str {
    match (running, paused) {
        (true, true) => YELLOW,
        (true, false) => GREEN,
        _ => GREY,
    }
}
