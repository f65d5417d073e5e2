//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the API location, theme, persistence timings and hotkeys.

mod error;
pub mod hotkeys;
pub mod preferences;

pub use error::ConfigError;

use crate::{board::persistence::PersistenceSettings, error::AppError};
use hotkeys::ViewHotkeys;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/workspace-board";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_TREE_DELAY_MS: u64 = 300;

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub default_workspace_id: Option<String>,
    pub theme_name: String,
    pub tree_delay_ms: u64,
    pub persistence: PersistenceSettings,
    pub hotkeys: ViewHotkeys,
    dir_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct FileSpec {
    pub api_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_workspace_id: Option<String>,
    pub theme_name: String,
    pub tree_delay_ms: u64,
    pub persistence: PersistenceSettings,
    pub hotkeys: ViewHotkeys,
}

impl Default for FileSpec {
    fn default() -> Self {
        FileSpec::from(&Config::new())
    }
}

impl From<&Config> for FileSpec {
    fn from(config: &Config) -> Self {
        FileSpec {
            api_base_url: config.api_base_url.clone(),
            default_workspace_id: config.default_workspace_id.clone(),
            theme_name: config.theme_name.clone(),
            tree_delay_ms: config.tree_delay_ms,
            persistence: config.persistence.clone(),
            hotkeys: config.hotkeys.clone(),
        }
    }
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_workspace_id: None,
            theme_name: default_theme_name(),
            tree_delay_ms: DEFAULT_TREE_DELAY_MS,
            persistence: PersistenceSettings::default(),
            hotkeys: ViewHotkeys::default(),
            dir_path: None,
        }
    }

    /// Load the configuration from the custom directory if provided, or from
    /// the default directory otherwise. A missing file is created with the
    /// current values.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }
        self.dir_path = Some(dir_path.clone());

        let file_path = dir_path.join(Path::new(FILE_NAME));
        if !file_path.exists() {
            info!("Creating configuration file {}", file_path.display());
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: format!("IO error: {}", e),
        })?;
        let data: FileSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        self.apply(data)?;
        Ok(())
    }

    fn apply(&mut self, data: FileSpec) -> Result<(), ConfigError> {
        let rate = data.persistence.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidValue {
                field: "persistence.failure_rate",
                message: format!("{} is outside [0, 1]", rate),
            });
        }
        self.api_base_url = data.api_base_url;
        self.default_workspace_id = data.default_workspace_id.filter(|id| !id.is_empty());
        self.theme_name = data.theme_name;
        self.tree_delay_ms = data.tree_delay_ms;
        self.persistence = data.persistence;
        self.hotkeys = data.hotkeys;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(&FileSpec::from(self))
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        let mut file = fs::File::create(&file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Return the directory holding the configuration files, once loaded.
    ///
    pub fn dir_path(&self) -> Option<&Path> {
        self.dir_path.as_deref()
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.dir_path.as_ref().map(|dir| dir.join(FILE_NAME))
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested");
        let mut config = Config::new();
        config.load(path.to_str()).unwrap();
        assert!(path.join(FILE_NAME).exists());
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.tree_delay_ms, 300);
        assert_eq!(config.dir_path(), Some(path.as_path()));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "default_workspace_id: ws-2\npersistence:\n  failure_rate: 0.25\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.default_workspace_id.as_deref(), Some("ws-2"));
        assert_eq!(config.persistence.failure_rate, 0.25);
        assert_eq!(config.persistence.reorder_delay_ms, 160);
        assert_eq!(config.theme_name, "tokyo-night");
        assert_eq!(config.hotkeys, ViewHotkeys::default());
    }

    #[test]
    fn saved_values_load_back() {
        let dir = tempdir().unwrap();
        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        config.theme_name = "dracula".to_string();
        config.api_base_url = "http://api.test".to_string();
        config.save().unwrap();

        let mut loaded = Config::new();
        loaded.load(dir.path().to_str()).unwrap();
        assert_eq!(loaded.theme_name, "dracula");
        assert_eq!(loaded.api_base_url, "http://api.test");
    }

    #[test]
    fn failure_rate_out_of_range_is_rejected() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "persistence:\n  failure_rate: 1.5\n",
        )
        .unwrap();
        let mut config = Config::new();
        assert!(config.load(dir.path().to_str()).is_err());
    }

    #[test]
    fn save_without_load_fails() {
        assert!(Config::new().save().is_err());
    }
}
