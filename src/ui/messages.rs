//! User-facing status lines. Diagnostics go through `tracing` instead.

use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::env;
use std::fmt;

const BOLD: &str = "\x1b[1m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

/// Honours the NO_COLOR convention.
fn styled(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    if env::var_os("NO_COLOR").is_some() {
        format!("{icon} {msg}")
    } else {
        format!("{color}{BOLD}{icon} {RESET}{msg}")
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", styled(CYAN, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", styled(GREEN, ICON_OK, msg));
}

/// Warnings go to stderr so they never mix into exported or piped output.
pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{}", styled(YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", styled(RED, ICON_ERR, msg));
}
