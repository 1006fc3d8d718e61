use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::errors::AppResult;
use crate::storage::KeyValueStore;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref())?;
    let db_path = cfg.database_path();
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rOvertime…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_str);

    // unlike the tracker, init must not fall back to memory
    let mut store = SqliteStore::open(&db_str)?;

    if let Err(e) = store.audit("init", "database", &format!("Database initialized at {db_str}")) {
        tracing::warn!(error = %e, "failed to write internal log");
    }

    success(format!("Database initialized at {db_str}"));
    Ok(())
}
