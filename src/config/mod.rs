use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOCALE: &str = "de-DE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_tick_interval() -> u64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            locale: default_locale(),
            tick_interval_secs: default_tick_interval(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rovertime")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rovertime")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rovertime.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rovertime.sqlite")
    }

    /// Load configuration from file, or return defaults if there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "malformed configuration");
            AppError::ConfigLoad
        })?;
        Ok(cfg.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.tick_interval_secs == 0 {
            self.tick_interval_secs = default_tick_interval();
        }
        if self.locale.trim().is_empty() {
            self.locale = default_locale();
        }
        self
    }

    /// Database path with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Writes the config file (when missing) and returns the config in use.
    /// A relative `custom_db` is placed inside the config directory.
    pub fn init_all(custom_db: Option<&str>) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        let file = Self::config_file();
        if !file.exists() {
            let yaml = serde_yaml::to_string(&config)?;
            let mut f = fs::File::create(&file)?;
            f.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
