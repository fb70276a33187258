//! Public identifier encoding and validation
//!
//! The node API version in use dictates whether `appUserId` is hex, base64,
//! or a raw UUID. The encoding is chosen once per deployment and the same
//! identifier flows through the deep link, the sponsor operation, and the
//! status poller.

use base64::{engine::general_purpose, Engine as _};
use uuid::Uuid;

use crate::errors::IdentifierError;
use crate::types::{AppUserId, IdEncoding};

// ----------------------------------------------------------------------------
// Minting
// ----------------------------------------------------------------------------

impl IdEncoding {
    /// Mint the public identifier for a session
    ///
    /// For `Hex` and `Base64` the identifier is the encoded session public
    /// key; for `Uuid` it is a fresh random UUID unrelated to the key.
    pub fn mint_app_user_id(&self, public_key: &[u8; 32]) -> AppUserId {
        match self {
            IdEncoding::Hex => AppUserId::new(hex::encode(public_key)),
            IdEncoding::Base64 => AppUserId::new(general_purpose::STANDARD.encode(public_key)),
            IdEncoding::Uuid => AppUserId::new(Uuid::new_v4().to_string()),
        }
    }

    /// Validate an identifier string against this encoding
    pub fn validate(&self, identifier: &str) -> Result<(), IdentifierError> {
        if identifier.is_empty() {
            return Err(IdentifierError::Empty);
        }

        match self {
            IdEncoding::Hex => {
                let bytes =
                    hex::decode(identifier).map_err(|_| IdentifierError::InvalidHex {
                        identifier: identifier.to_string(),
                    })?;
                if bytes.len() != 32 {
                    return Err(IdentifierError::WrongLength {
                        expected: 32,
                        actual: bytes.len(),
                    });
                }
            }
            IdEncoding::Base64 => {
                let bytes = general_purpose::STANDARD.decode(identifier).map_err(|_| {
                    IdentifierError::InvalidBase64 {
                        identifier: identifier.to_string(),
                    }
                })?;
                if bytes.len() != 32 {
                    return Err(IdentifierError::WrongLength {
                        expected: 32,
                        actual: bytes.len(),
                    });
                }
            }
            IdEncoding::Uuid => {
                Uuid::parse_str(identifier).map_err(|_| IdentifierError::InvalidUuid {
                    identifier: identifier.to_string(),
                })?;
            }
        }

        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SessionKeyPair;

    #[test]
    fn test_hex_identifier_roundtrip() {
        let pair = SessionKeyPair::generate().unwrap();
        let id = IdEncoding::Hex.mint_app_user_id(&pair.public_key_bytes());

        assert_eq!(id.as_str().len(), 64);
        assert!(IdEncoding::Hex.validate(id.as_str()).is_ok());
        assert_eq!(
            hex::decode(id.as_str()).unwrap(),
            pair.public_key_bytes().to_vec()
        );
    }

    #[test]
    fn test_base64_identifier_roundtrip() {
        let pair = SessionKeyPair::generate().unwrap();
        let id = IdEncoding::Base64.mint_app_user_id(&pair.public_key_bytes());

        assert!(IdEncoding::Base64.validate(id.as_str()).is_ok());
        assert_eq!(
            general_purpose::STANDARD.decode(id.as_str()).unwrap(),
            pair.public_key_bytes().to_vec()
        );
    }

    #[test]
    fn test_uuid_identifiers_are_random() {
        let key = [0u8; 32];
        let a = IdEncoding::Uuid.mint_app_user_id(&key);
        let b = IdEncoding::Uuid.mint_app_user_id(&key);

        assert_ne!(a, b);
        assert!(IdEncoding::Uuid.validate(a.as_str()).is_ok());
    }

    #[test]
    fn test_empty_identifier_rejected() {
        for encoding in [IdEncoding::Hex, IdEncoding::Base64, IdEncoding::Uuid] {
            assert!(matches!(
                encoding.validate(""),
                Err(IdentifierError::Empty)
            ));
        }
    }

    #[test]
    fn test_cross_encoding_rejection() {
        let pair = SessionKeyPair::generate().unwrap();
        let hex_id = IdEncoding::Hex.mint_app_user_id(&pair.public_key_bytes());

        // A 64-char hex string is not a UUID
        assert!(IdEncoding::Uuid.validate(hex_id.as_str()).is_err());
        // A UUID is not 32 bytes of hex
        let uuid_id = IdEncoding::Uuid.mint_app_user_id(&pair.public_key_bytes());
        assert!(IdEncoding::Hex.validate(uuid_id.as_str()).is_err());
    }

    #[test]
    fn test_truncated_hex_rejected() {
        assert!(matches!(
            IdEncoding::Hex.validate("abcd1234"),
            Err(IdentifierError::WrongLength { expected: 32, .. })
        ));
    }
}
