use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines workspace data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Defines project data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Defines folder data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub order: usize,
    #[serde(default)]
    pub projects: Vec<ProjectNode>,
}

/// Defines workspace tree data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceTree {
    pub workspace: WorkspaceSummary,
    pub folders: Vec<FolderNode>,
}

/// Body of the workspace list response.
///
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct WorkspaceList {
    pub workspaces: Vec<WorkspaceSummary>,
}

/// Body of an error response.
///
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
