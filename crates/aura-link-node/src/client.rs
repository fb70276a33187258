//! HTTP client for the BrightID node API
//!
//! The `SponsorshipApi` trait is the seam between the linking flow and the
//! network: the runtime and the poller only ever see the trait, so tests can
//! substitute a scripted node without touching HTTP.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use aura_link_core::{AppUserId, NodeEndpoints, OperationHash, SponsorOperation};

use crate::api::{OperationReceipt, OperationResponse, SponsorshipStatus};
use crate::error::{NodeError, Result};

// ----------------------------------------------------------------------------
// Sponsorship API Trait
// ----------------------------------------------------------------------------

/// Remote node operations the linking flow depends on
#[async_trait]
pub trait SponsorshipApi: Send + Sync {
    /// Submit a signed operation; returns the node's receipt
    async fn submit_operation(&self, operation: &SponsorOperation) -> Result<OperationReceipt>;

    /// Query the sponsorship status for a public identifier
    async fn sponsorship_status(&self, app_user_id: &AppUserId) -> Result<SponsorshipStatus>;
}

#[async_trait]
impl<T: SponsorshipApi + ?Sized> SponsorshipApi for std::sync::Arc<T> {
    async fn submit_operation(&self, operation: &SponsorOperation) -> Result<OperationReceipt> {
        (**self).submit_operation(operation).await
    }

    async fn sponsorship_status(&self, app_user_id: &AppUserId) -> Result<SponsorshipStatus> {
        (**self).sponsorship_status(app_user_id).await
    }
}

// ----------------------------------------------------------------------------
// Node Client
// ----------------------------------------------------------------------------

/// `SponsorshipApi` implementation over HTTPS
#[derive(Debug, Clone)]
pub struct NodeClient {
    base_url: Url,
    client: reqwest::Client,
}

impl NodeClient {
    /// Create a client for the configured node endpoints
    pub fn new(endpoints: &NodeEndpoints) -> Result<Self> {
        Self::with_client(endpoints, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(endpoints: &NodeEndpoints, client: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(&endpoints.base_url).map_err(|_| NodeError::InvalidBaseUrl {
            url: endpoints.base_url.clone(),
        })?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| NodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SponsorshipApi for NodeClient {
    async fn submit_operation(&self, operation: &SponsorOperation) -> Result<OperationReceipt> {
        let url = self.endpoint(&["operations"])?;
        debug!(app_user_id = %operation.app_user_id, "submitting sponsor operation");

        let response = self.client.post(url).json(operation).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(status = status.as_u16(), "node rejected operation");
            return Err(NodeError::Submission {
                status: status.as_u16(),
                message,
            });
        }

        let body: OperationResponse = response
            .json()
            .await
            .map_err(|e| NodeError::invalid_response(e.to_string()))?;

        Ok(OperationReceipt {
            hash: OperationHash::new(body.data.hash),
        })
    }

    async fn sponsorship_status(&self, app_user_id: &AppUserId) -> Result<SponsorshipStatus> {
        let url = self.endpoint(&["sponsorships", app_user_id.as_str()])?;

        let response = self.client.get(url).send().await?;
        let http_status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| NodeError::invalid_response(e.to_string()))?;

        let status = SponsorshipStatus::derive(http_status, body);
        debug!(app_user_id = %app_user_id, state = ?status.state, "sponsorship status");
        Ok(status)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_construction() {
        let client = NodeClient::new(&NodeEndpoints {
            base_url: "https://app.brightid.org/node/v6".to_string(),
        })
        .unwrap();

        assert_eq!(
            client.endpoint(&["operations"]).unwrap().as_str(),
            "https://app.brightid.org/node/v6/operations"
        );
        assert_eq!(
            client.endpoint(&["sponsorships", "abc123"]).unwrap().as_str(),
            "https://app.brightid.org/node/v6/sponsorships/abc123"
        );
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let client = NodeClient::new(&NodeEndpoints {
            base_url: "https://app.brightid.org/node/v6/".to_string(),
        })
        .unwrap();

        assert_eq!(
            client.endpoint(&["operations"]).unwrap().as_str(),
            "https://app.brightid.org/node/v6/operations"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = NodeClient::new(&NodeEndpoints {
            base_url: "definitely not a url".to_string(),
        });
        assert!(matches!(result, Err(NodeError::InvalidBaseUrl { .. })));
    }
}
