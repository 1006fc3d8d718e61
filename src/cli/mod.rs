pub mod commands;
pub mod parser;
pub mod prompt;

use crate::config::Config;
use crate::core::capabilities::{AutoConfirm, Confirm, SystemClock};
use crate::core::tracker::Tracker;
use crate::storage::{KeyValueStore, open_store};
use crate::ui::messages::warning;
use parser::Cli;

pub type CliTracker = Tracker<Box<dyn KeyValueStore>, Box<dyn Confirm>, SystemClock>;

/// `--yes` answers every prompt; otherwise the terminal is asked.
pub fn confirmer(cli: &Cli) -> Box<dyn Confirm> {
    if cli.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(prompt::TerminalConfirm)
    }
}

/// Tracker on the configured database (memory fallback if it cannot be opened).
pub fn open_tracker(cli: &Cli, cfg: &Config) -> CliTracker {
    let db = cfg.database_path();
    let store = open_store(&db.to_string_lossy());
    if store.backend_name() == "memory" {
        warning(format!(
            "Database {} unavailable, changes will not be saved.",
            db.display()
        ));
    }
    Tracker::open(store, confirmer(cli), SystemClock)
}
