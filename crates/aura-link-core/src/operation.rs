//! Sponsor operation construction and signing
//!
//! The sponsor operation is the structured record submitted to the node to
//! pay for a BrightID user's access to the application context. The detached
//! signature covers the canonical serialization of every field except the
//! reserved signature/hash fields.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::canonical::canonicalize_record;
use crate::crypto::{SessionKeyPair, SIGNATURE_LENGTH};
use crate::errors::CryptoError;
use crate::types::{AppId, AppUserId, Timestamp};
use crate::Result;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Operation name literal the node dispatches on
pub const SPONSOR_OPERATION_NAME: &str = "Sponsor";

/// Node protocol version this client speaks
pub const PROTOCOL_VERSION: u32 = 6;

// ----------------------------------------------------------------------------
// Sponsor Operation
// ----------------------------------------------------------------------------

/// The sponsor operation record, in node wire shape
///
/// `sig` is absent until [`SponsorOperation::sign`] populates it; the signed
/// payload is identical either way because canonicalization strips reserved
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorOperation {
    pub name: String,
    pub app: AppId,
    #[serde(rename = "appUserId")]
    pub app_user_id: AppUserId,
    pub timestamp: Timestamp,
    pub v: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

impl SponsorOperation {
    /// Build an unsigned sponsor operation
    pub fn new(app: AppId, app_user_id: AppUserId, timestamp: Timestamp) -> Self {
        Self {
            name: SPONSOR_OPERATION_NAME.to_string(),
            app,
            app_user_id,
            timestamp,
            v: PROTOCOL_VERSION,
            sig: None,
        }
    }

    /// The canonical byte string the signature covers
    pub fn signing_payload(&self) -> Result<String> {
        canonicalize_record(self)
    }

    /// Return a copy with `sig` populated
    ///
    /// The signature is deterministic for a fixed key and timestamp; mutating
    /// any non-reserved field afterwards invalidates it, so callers must
    /// re-sign instead of patching a signed record.
    pub fn sign(&self, key_pair: &SessionKeyPair) -> Result<SponsorOperation> {
        let payload = self.signing_payload()?;
        let signature = key_pair.sign(payload.as_bytes());

        let mut signed = self.clone();
        signed.sig = Some(general_purpose::STANDARD.encode(signature));
        Ok(signed)
    }

    /// Verify the attached signature against a public key
    pub fn verify(&self, public_key: &[u8; 32]) -> Result<()> {
        let sig = self
            .sig
            .as_deref()
            .ok_or(CryptoError::InvalidSignature {
                reason: "operation is unsigned".to_string(),
            })?;

        let decoded = general_purpose::STANDARD
            .decode(sig)
            .map_err(|e| CryptoError::InvalidSignature {
                reason: e.to_string(),
            })?;
        let signature: [u8; SIGNATURE_LENGTH] =
            decoded
                .try_into()
                .map_err(|_| CryptoError::InvalidSignature {
                    reason: "signature is not 64 bytes".to_string(),
                })?;

        let payload = self.signing_payload()?;
        SessionKeyPair::verify(public_key, payload.as_bytes(), &signature)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
