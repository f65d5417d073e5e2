//! Workspace REST API.

mod client;
pub mod error;
pub mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use serde_json::json;

/// Longest artificial delay the tree endpoint is asked for.
///
pub const MAX_TREE_DELAY_MS: u64 = 2000;

/// Responsible for asynchronous interaction with the workspace API including
/// transformation of response data into explicitly-defined types.
///
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Api {
        debug!("Initializing workspace API client for {}...", base_url);
        Api {
            client: Client::new(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.client.base_url
    }

    /// Returns the workspaces visible to the user.
    ///
    pub async fn workspaces(&self) -> Result<Vec<WorkspaceSummary>, ApiError> {
        debug!("Requesting workspaces...");
        let list: WorkspaceList = self.client.get_json(&["api", "workspaces"], &[]).await?;
        Ok(list.workspaces)
    }

    /// Returns the folder tree of a workspace. The requested server delay is
    /// clamped to [`MAX_TREE_DELAY_MS`].
    ///
    pub async fn workspace_tree(
        &self,
        workspace_id: &str,
        delay_ms: Option<u64>,
    ) -> Result<WorkspaceTree, ApiError> {
        debug!("Requesting tree for workspace {}...", workspace_id);
        let params: Vec<(&str, String)> = delay_ms
            .map(|delay| vec![("delay", delay.min(MAX_TREE_DELAY_MS).to_string())])
            .unwrap_or_default();
        self.client
            .get_json(&["api", "workspaces", workspace_id, "tree"], &params)
            .await
    }

    /// Creates a folder with the trimmed name and returns it.
    ///
    pub async fn create_folder(&self, workspace_id: &str, name: &str) -> Result<FolderNode, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Folder name is required".to_owned()));
        }
        debug!("Creating folder '{}' in workspace {}...", name, workspace_id);
        self.client
            .post_json(
                &["api", "workspaces", workspace_id, "folders"],
                &json!({ "name": name }),
            )
            .await
    }
}
