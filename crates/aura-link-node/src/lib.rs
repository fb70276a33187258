//! BrightID node API client for the linking flow
//!
//! This crate owns everything that crosses the network: submitting signed
//! sponsor operations to the node and polling the sponsorship status until a
//! terminal outcome. The `SponsorshipApi` trait is the seam the runtime and
//! tests program against.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod api;
pub mod client;
pub mod error;
pub mod poller;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use api::{OperationReceipt, SponsorshipState, SponsorshipStatus};
pub use client::{NodeClient, SponsorshipApi};
pub use error::{NodeError, Result};
pub use poller::{poll_status, PollOutcome};
