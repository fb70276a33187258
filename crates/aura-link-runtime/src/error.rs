//! Error types for session orchestration

use thiserror::Error;

use crate::session::SessionState;

/// Errors from the session orchestrator
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Protocol error: {0}")]
    Link(#[from] aura_link_core::LinkError),

    #[error("Failed to submit sponsor operation: {0}")]
    Submission(#[source] aura_link_node::NodeError),

    #[error("Session is not ready for {operation} (state: {state:?})")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("A sponsorship attempt is already in flight for this session")]
    SponsorshipInFlight,

    #[error("Session key material has been discarded")]
    KeyMaterialDiscarded,
}

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, SessionError>;
