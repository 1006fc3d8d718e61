use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = SqliteStore::open(&cfg.database_path().to_string_lossy())?;
        let rows = store.log_rows()?;
        if rows.is_empty() {
            info("The internal log is empty.");
        } else {
            LogLogic::print_log(&rows);
        }
    }

    Ok(())
}
