//! Error types for the node API client

use thiserror::Error;

/// Errors talking to the BrightID node
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Node rejected operation (status {status}): {message}")]
    Submission { status: u16, message: String },

    #[error("Unexpected response shape from node: {reason}")]
    InvalidResponse { reason: String },

    #[error("Invalid node base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Protocol error: {0}")]
    Link(#[from] aura_link_core::LinkError),
}

impl NodeError {
    /// Create an invalid response error with a reason
    pub fn invalid_response<T: Into<String>>(reason: T) -> Self {
        NodeError::InvalidResponse {
            reason: reason.into(),
        }
    }
}

/// Result type for node API operations
pub type Result<T> = std::result::Result<T, NodeError>;
