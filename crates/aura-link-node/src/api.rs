//! Wire types for the BrightID node v6 API
//!
//! The node wraps successful payloads in `{"data": ...}` and failures in
//! `{"error": true, "errorMessage": ..., "errorNum": ...}`. Sponsorship
//! status is derived from that envelope rather than trusted field by field,
//! because older nodes omit pieces of it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use aura_link_core::OperationHash;

// ----------------------------------------------------------------------------
// Operation Receipt
// ----------------------------------------------------------------------------

/// Receipt returned by the node when an operation is accepted for processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReceipt {
    /// Node-assigned hash identifying the queued operation
    pub hash: OperationHash,
}

/// Success envelope for `POST /operations`
#[derive(Debug, Deserialize)]
pub(crate) struct OperationResponse {
    pub data: OperationResponseData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OperationResponseData {
    pub hash: String,
}

// ----------------------------------------------------------------------------
// Sponsorship Status
// ----------------------------------------------------------------------------

/// Sponsorship state as far as the node reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorshipState {
    /// The operation has not (yet) been applied
    Pending,
    /// Both sides authorized; the user is sponsored
    Sponsored,
    /// The node explicitly refused the sponsorship
    Rejected,
    /// The response could not be interpreted
    Unknown,
}

impl SponsorshipState {
    /// Whether this state ends the polling loop
    pub fn is_terminal(&self) -> bool {
        matches!(self, SponsorshipState::Sponsored | SponsorshipState::Rejected)
    }
}

/// Result of one sponsorship status query
#[derive(Debug, Clone)]
pub struct SponsorshipStatus {
    /// Derived state
    pub state: SponsorshipState,
    /// Last response payload, kept opaque beyond the state derivation
    pub raw: Value,
}

/// Envelope for `GET /sponsorships/{appUserId}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorshipEnvelope {
    data: Option<SponsorshipData>,
    #[serde(default)]
    error: bool,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorshipData {
    #[serde(default)]
    app_has_authorized: bool,
    #[serde(default)]
    spend_requested: bool,
}

impl SponsorshipStatus {
    /// Derive the sponsorship state from an HTTP status and response body
    ///
    /// A not-found response means the operation simply has not landed yet,
    /// so it maps to `Pending` rather than an error. Any other node error
    /// envelope is an explicit refusal. Bodies that fit neither shape are
    /// `Unknown`, which keeps the poll alive instead of terminating on a
    /// transient glitch.
    pub fn derive(http_status: u16, body: Value) -> Self {
        let state = match serde_json::from_value::<SponsorshipEnvelope>(body.clone()) {
            Ok(envelope) => match envelope.data {
                Some(data) if data.app_has_authorized && data.spend_requested => {
                    SponsorshipState::Sponsored
                }
                Some(_) => SponsorshipState::Pending,
                None if http_status == 404 => SponsorshipState::Pending,
                None if envelope.error => {
                    let message = envelope.error_message.unwrap_or_default();
                    if message.to_ascii_lowercase().contains("not found") {
                        SponsorshipState::Pending
                    } else {
                        SponsorshipState::Rejected
                    }
                }
                None => SponsorshipState::Unknown,
            },
            Err(_) => SponsorshipState::Unknown,
        };

        Self { state, raw: body }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
