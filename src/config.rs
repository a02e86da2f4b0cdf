use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

/// Directory used for table documents and `config.json` when `DATA_DIR` is unset.
const DEFAULT_DATA_DIR: &str = "data";

/// Process configuration read from the environment.
pub struct Config {
    pub discord_token: String,

    /// Directory holding `tables_active.json`, `tables_archived.json` and `config.json`.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_token: std::env::var("DISCORD_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?,
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
        })
    }

    /// Path of the settings document inside the data directory.
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}
