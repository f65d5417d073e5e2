//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File path was not set
    #[error("Configuration file path not set")]
    FilePathNotSet,

    /// Failed to find home directory
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    /// Failed to load a file
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write a file
    #[error("Failed to save configuration to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create configuration directory
    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationFailed(String),

    /// Stored preference has an unexpected shape
    #[error("Preference {key} is not {expected}")]
    PreferenceType { key: String, expected: &'static str },

    /// Configured value is out of range
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::FilePathNotSet;
        assert!(error.to_string().contains("file path not set"));

        let error = ConfigError::HomeDirectoryNotFound;
        assert!(error.to_string().contains("home directory"));

        let error = ConfigError::DeserializationFailed("bad yaml".to_string());
        assert!(error.to_string().contains("bad yaml"));

        let error = ConfigError::PreferenceType {
            key: "sidebar:ws:expanded-folders".to_string(),
            expected: "a list of strings",
        };
        assert!(error.to_string().contains("expanded-folders"));
        assert!(error.to_string().contains("list of strings"));
    }

    #[test]
    fn test_config_error_with_path() {
        let path = PathBuf::from("/test/preferences.yml");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ConfigError::SaveFailed {
            path: path.clone(),
            source: io_error,
        };
        assert!(error.to_string().contains("/test/preferences.yml"));
    }
}
