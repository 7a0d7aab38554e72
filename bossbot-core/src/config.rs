// File: src/config.rs

use std::path::PathBuf;

use tracing::debug;

use crate::Error;

/// Environment variable that overrides the data file location.
pub const DATA_FILE_ENV: &str = "BOSSBOT_DATA_FILE";

const APP_DIR: &str = "bossbot";
const DATA_FILE_NAME: &str = "boss_data.json";

/// Where the boss data document is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self { data_file: data_file.into() }
    }

    /// Resolves the data file from an explicit path, then `BOSSBOT_DATA_FILE`
    /// (a `.env` file is loaded first), then the platform data directory.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        dotenv::dotenv().ok();
        let from_env = std::env::var(DATA_FILE_ENV).ok();
        let config = Self::resolve(explicit, from_env, dirs::data_dir());
        debug!("Resolved boss data file: {:?}", config.data_file);
        config
    }

    /// Pure resolution step behind [`StoreConfig::from_env`].
    pub fn resolve(
        explicit: Option<PathBuf>,
        env_value: Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        if let Some(path) = env_value.filter(|v| !v.trim().is_empty()) {
            return Self::new(path);
        }
        let path = match data_dir {
            Some(dir) => dir.join(APP_DIR).join(DATA_FILE_NAME),
            None => PathBuf::from("data").join(DATA_FILE_NAME),
        };
        Self::new(path)
    }

    /// Rejects paths that can never hold the data file.
    pub fn validate(&self) -> Result<(), Error> {
        if self.data_file.as_os_str().is_empty() {
            return Err(Error::Config("data file path is empty".into()));
        }
        if self.data_file.is_dir() {
            return Err(Error::Config(format!(
                "data file path {:?} is a directory",
                self.data_file
            )));
        }
        Ok(())
    }
}
