//! Core protocol implementation for the BrightID linking flow
//!
//! This crate provides the pure pieces of the linking and sponsorship
//! protocol: session key material, canonical record serialization, sponsor
//! operation signing, and deep-link encoding. It performs no I/O; submission
//! and status polling live in `aura-link-node`, session orchestration in
//! `aura-link-runtime`.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod canonical;
pub mod config;
pub mod crypto;
pub mod deeplink;
pub mod errors;
pub mod identifier;
pub mod operation;
pub mod types;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use canonical::{canonicalize, canonicalize_record, RESERVED_FIELDS};
pub use config::{DeepLinkConfig, LinkConfig, NodeEndpoints, PollConfig};
pub use crypto::SessionKeyPair;
pub use deeplink::build_deep_link;
pub use errors::{CryptoError, IdentifierError, LinkError, Result};
pub use operation::{SponsorOperation, PROTOCOL_VERSION, SPONSOR_OPERATION_NAME};
pub use types::{AppId, AppUserId, IdEncoding, OperationHash, SessionId, Timestamp};
