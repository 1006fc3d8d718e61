use crate::cli::CliTracker;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, tracker: &mut CliTracker) -> AppResult<()> {
    match cmd {
        Commands::Del { id } => {
            let removed = tracker.delete_entry(*id)?;
            success(format!("Entry {} ({}) has been deleted.", removed.id, removed.date));
        }
        Commands::Clear => match tracker.clear_entries() {
            Some(n) => success(format!("Deleted {n} entries.")),
            None => info("Operation cancelled."),
        },
        _ => {}
    }

    Ok(())
}
