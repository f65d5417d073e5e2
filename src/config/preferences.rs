//! Key-value preference store.
//!
//! Holds UI state that should survive restarts, such as expanded sidebar
//! folders. Keys are scoped by workspace id and values are kept in a YAML
//! file next to the configuration file.

use super::ConfigError;
use crate::error::AppError;
use log::*;
use serde_yaml::Value;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "preferences.yml";

/// Key of the workspace picked in the workspace switcher.
///
pub const SELECTED_WORKSPACE_KEY: &str = "sidebar:selected-workspace";

/// Key of the expanded folder ids of a workspace.
///
pub fn expanded_folders_key(workspace_id: &str) -> String {
    format!("sidebar:{}:expanded-folders", workspace_id)
}

/// Key of the selected sidebar node of a workspace.
///
pub fn selected_node_key(workspace_id: &str) -> String {
    format!("sidebar:{}:selected-node", workspace_id)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreferenceStore {
    values: BTreeMap<String, Value>,
    file_path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Load the store from the configuration directory. A missing file
    /// yields an empty store bound to that path.
    ///
    pub fn load(dir_path: &Path) -> Result<Self, AppError> {
        let file_path = dir_path.join(FILE_NAME);
        let mut store = PreferenceStore {
            values: BTreeMap::new(),
            file_path: Some(file_path.clone()),
        };
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            if !contents.trim().is_empty() {
                store.values = serde_yaml::from_str(&contents)
                    .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            }
        }
        debug!("Loaded {} preferences", store.values.len());
        Ok(store)
    }

    /// Write the store to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(&self.values)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        fs::write(file_path, content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(ConfigError::PreferenceType {
                key: key.to_owned(),
                expected: "a string",
            }),
        }
    }

    pub fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let items = match self.values.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Sequence(items)) => items,
            Some(_) => {
                return Err(ConfigError::PreferenceType {
                    key: key.to_owned(),
                    expected: "a list of strings",
                })
            }
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(value) => Ok(value.clone()),
                _ => Err(ConfigError::PreferenceType {
                    key: key.to_owned(),
                    expected: "a list of strings",
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> &mut Self {
        self.values.insert(key.to_owned(), Value::String(value.to_owned()));
        self
    }

    pub fn set_string_list(&mut self, key: &str, values: &[String]) -> &mut Self {
        let items = values.iter().cloned().map(Value::String).collect();
        self.values.insert(key.to_owned(), Value::Sequence(items));
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.values.remove(key);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
