//! Session lifecycle orchestration for the BrightID linking flow
//!
//! This crate coordinates the pure protocol pieces from `aura-link-core`
//! and the node client from `aura-link-node` behind the `LinkingSession`
//! lifecycle: start, present the deep link, sponsor, poll, settle. Sessions
//! are explicit values, so any number of them can run concurrently without
//! shared mutable state.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod error;
pub mod orchestrator;
pub mod session;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use error::{Result, SessionError};
pub use orchestrator::SessionOrchestrator;
pub use session::{CancelHandle, LinkingSession, SessionState};
