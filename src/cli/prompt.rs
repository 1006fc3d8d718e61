use crate::core::capabilities::Confirm;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Yes/no question on the terminal. Anything but "y"/"yes" (or EOF) is a no.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str, title: &str) -> bool {
        warning(format!("{title}: {message}"));
        print!("Confirm [y/N]: ");
        let _ = io::stdout().flush();

        let mut s = String::new();
        match io::stdin().read_line(&mut s) {
            Ok(n) if n > 0 => matches!(s.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
