//! Error handling for the linking CLI

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Protocol error: {0}")]
    Link(#[from] aura_link_core::LinkError),

    #[error("Node error: {0}")]
    Node(#[from] aura_link_node::NodeError),

    #[error("Session error: {0}")]
    Session(#[from] aura_link_runtime::SessionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("QR rendering error: {0}")]
    Qr(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
