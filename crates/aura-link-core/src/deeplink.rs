//! Deep link encoding
//!
//! Builds the URI the companion wallet app opens to begin its side of the
//! linking flow. Pure function of the configuration, the application
//! identifier, and the session's public identifier: identical inputs always
//! produce byte-identical output, so a QR code can be re-rendered at any
//! size without re-deriving the session.

use url::Url;

use crate::config::DeepLinkConfig;
use crate::types::{AppId, AppUserId, IdEncoding};
use crate::{LinkError, Result};

// ----------------------------------------------------------------------------
// Deep Link Encoder
// ----------------------------------------------------------------------------

/// Build the deep link for a linking session
///
/// The identifier is validated against the configured encoding before the
/// link is emitted; a malformed identifier fails loudly instead of producing
/// a link the wallet app cannot parse. Nothing secret is ever embedded.
pub fn build_deep_link(
    config: &DeepLinkConfig,
    encoding: IdEncoding,
    app_id: &AppId,
    app_user_id: &AppUserId,
) -> Result<String> {
    if app_id.is_empty() {
        return Err(LinkError::config_error("app_id must not be empty"));
    }
    encoding.validate(app_user_id.as_str())?;

    let mut url = Url::parse(&config.base_url)
        .map_err(|e| LinkError::config_error(format!("invalid deep link base_url: {}", e)))?;

    url.path_segments_mut()
        .map_err(|_| LinkError::config_error("deep link base_url cannot carry path segments"))?
        .pop_if_empty()
        .push(app_id.as_str())
        .push(app_user_id.as_str());

    Ok(url.into())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SessionKeyPair;

    fn test_config() -> DeepLinkConfig {
        DeepLinkConfig::default()
    }

    #[test]
    fn test_deep_link_shape() {
        let id = AppUserId::new("a".repeat(64));
        let link = build_deep_link(
            &test_config(),
            IdEncoding::Hex,
            &AppId::new("AuraDashboard"),
            &id,
        )
        .unwrap();

        assert_eq!(
            link,
            format!(
                "https://app.brightid.org/link-verification/AuraDashboard/{}",
                "a".repeat(64)
            )
        );
    }

    #[test]
    fn test_deep_link_is_pure() {
        let pair = SessionKeyPair::generate().unwrap();
        let id = IdEncoding::Hex.mint_app_user_id(&pair.public_key_bytes());
        let app_id = AppId::new("AuraDashboard");

        let first = build_deep_link(&test_config(), IdEncoding::Hex, &app_id, &id).unwrap();
        let second = build_deep_link(&test_config(), IdEncoding::Hex, &app_id, &id).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_identifier_rejected() {
        let result = build_deep_link(
            &test_config(),
            IdEncoding::Hex,
            &AppId::new("AuraDashboard"),
            &AppUserId::new("not-hex-at-all"),
        );
        assert!(matches!(result, Err(LinkError::Identifier(_))));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let result = build_deep_link(
            &test_config(),
            IdEncoding::Uuid,
            &AppId::new("AuraDashboard"),
            &AppUserId::new(""),
        );
        assert!(matches!(result, Err(LinkError::Identifier(_))));
    }

    #[test]
    fn test_identifier_never_contains_secret() {
        let pair = SessionKeyPair::generate().unwrap();
        let id = IdEncoding::Hex.mint_app_user_id(&pair.public_key_bytes());
        let link = build_deep_link(
            &test_config(),
            IdEncoding::Hex,
            &AppId::new("AuraDashboard"),
            &id,
        )
        .unwrap();

        // Contains exactly the public identifier, nothing derived from the
        // signing half
        assert!(link.contains(id.as_str()));
    }

    #[test]
    fn test_app_id_is_percent_escaped() {
        let id = AppUserId::new("b".repeat(64));
        let link = build_deep_link(
            &test_config(),
            IdEncoding::Hex,
            &AppId::new("Aura Dashboard"),
            &id,
        )
        .unwrap();
        assert!(link.contains("Aura%20Dashboard"));
    }
}
