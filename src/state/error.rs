//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// No workspace is active
    #[error("No workspace selected")]
    WorkspaceNotSet,

    /// Project form has no target folder
    #[error("Choose where the project should live.")]
    FolderNotSelected,

    /// Form input failed validation
    #[error("{0}")]
    Validation(String),
}
