//! rOvertime library root.
//! Exposes the calculation core, the tracker, storage backends and the CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => return commands::init::handle(cli),
        Commands::Config { .. } => return commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => return commands::log::handle(&cli.command, cfg),
        _ => {}
    }

    let mut tracker = cli::open_tracker(cli, cfg);
    let cmd = &cli.command;

    match cmd {
        Commands::Settings { .. } => commands::settings::handle(cmd, &mut tracker),
        Commands::Start { .. }
        | Commands::Pause
        | Commands::Resume
        | Commands::Stop
        | Commands::Commit => commands::timer::handle(cmd, &mut tracker),
        Commands::Status { .. } | Commands::Watch { .. } => {
            commands::status::handle(cmd, &mut tracker, cfg)
        }
        Commands::Add { .. } | Commands::Calc { .. } => commands::add::handle(cmd, &mut tracker),
        Commands::List { .. } | Commands::Balance => commands::list::handle(cmd, &mut tracker, cfg),
        Commands::Del { .. } | Commands::Clear => commands::del::handle(cmd, &mut tracker),
        Commands::Export { .. } => commands::export::handle(cli, &mut tracker),
        Commands::Init | Commands::Config { .. } | Commands::Log { .. } => Ok(()),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
