//! Workspace API-specific error types.

/// Errors that can occur during workspace API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Base URL cannot carry request paths
    #[error("Invalid API base URL {0}")]
    InvalidUrl(String),

    /// Request rejected before it was sent
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Return true for responses that name a missing resource.
    ///
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { status: 404, .. })
    }
}
