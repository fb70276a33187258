//! Error types for the linking protocol core
//!
//! This module contains the error taxonomy shared across the linking flow:
//! cryptographic errors, identifier validation errors, and the main
//! LinkError type that unifies them.

// ----------------------------------------------------------------------------
// Specific Error Types
// ----------------------------------------------------------------------------

/// Cryptographic error types
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Key generation failed: {reason}")]
    KeyGenerationFailed { reason: String },
    #[error("Invalid secret key length: expected 32 or 64 bytes, got {actual}")]
    InvalidKeyLength { actual: usize },
    #[error("Secret key public half does not match the derived public key")]
    KeyMismatch,
    #[error("Signature verification failed")]
    VerificationFailed,
    #[error("Invalid signature encoding: {reason}")]
    InvalidSignature { reason: String },
}

/// Public identifier validation error types
#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
    #[error("Identifier is empty")]
    Empty,
    #[error("Identifier is not valid hex: {identifier}")]
    InvalidHex { identifier: String },
    #[error("Identifier is not valid base64: {identifier}")]
    InvalidBase64 { identifier: String },
    #[error("Identifier is not a valid UUID: {identifier}")]
    InvalidUuid { identifier: String },
    #[error("Identifier has wrong decoded length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

// ----------------------------------------------------------------------------
// Unified Error Type
// ----------------------------------------------------------------------------

/// Core error type for the linking protocol
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

// ----------------------------------------------------------------------------
// Convenience Error Constructors
// ----------------------------------------------------------------------------

impl LinkError {
    /// Create a configuration error with a reason
    pub fn config_error<T: Into<String>>(reason: T) -> Self {
        LinkError::Configuration {
            reason: reason.into(),
        }
    }
}

// ----------------------------------------------------------------------------
// Type Aliases
// ----------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, LinkError>;
