use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            if path.exists() {
                ConfigLogic::print(&path.to_string_lossy())?;
            } else {
                // defaults in effect, nothing on disk yet
                println!("{}", serde_yaml::to_string(cfg)?);
            }
        }

        if *edit_config {
            if !path.exists() {
                info("No configuration file yet, creating one with defaults.");
                Config::init_all(None)?;
            }
            ConfigLogic::edit(&path.to_string_lossy(), editor)?;
            success("Configuration file edited.");
        }

        if !*print_config && !*edit_config {
            info(format!("Configuration file: {}", path.display()));
        }
    }

    Ok(())
}
