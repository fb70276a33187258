//! Configuration for the linking flow
//!
//! All timing, endpoint, and encoding choices live here so that a dashboard,
//! a CLI, and tests can share one validated configuration tree. Durations are
//! stored as plain integers (`*_ms` / `*_secs`) to keep the serialized form
//! readable.

use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::types::{AppId, IdEncoding};
use crate::{LinkError, Result};

// ----------------------------------------------------------------------------
// Link Configuration
// ----------------------------------------------------------------------------

/// Complete configuration for one linking deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Application identifier registered with the BrightID node
    pub app_id: AppId,

    /// Encoding of the session public identifier expected by the node
    pub id_encoding: IdEncoding,

    /// Node API endpoints
    pub node: NodeEndpoints,

    /// Deep link construction
    pub deep_link: DeepLinkConfig,

    /// Sponsorship status polling
    pub poll: PollConfig,
}

/// BrightID node API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEndpoints {
    /// Base URL of the node API, e.g. `https://app.brightid.org/node/v6`
    pub base_url: String,
}

/// Deep link construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLinkConfig {
    /// Base URL the wallet app's registered handler matches on
    pub base_url: String,
}

/// Sponsorship status polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between status queries (in milliseconds)
    pub interval_ms: u64,

    /// Overall budget before the poll gives up (in seconds)
    pub timeout_secs: u64,

    /// Optional cap on the number of status queries
    pub max_attempts: Option<u32>,
}

impl PollConfig {
    /// Delay between status queries
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Overall poll budget
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ----------------------------------------------------------------------------
// Default Implementations
// ----------------------------------------------------------------------------

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            app_id: AppId::new("AuraDashboard"),
            id_encoding: IdEncoding::default(),
            node: NodeEndpoints::default(),
            deep_link: DeepLinkConfig::default(),
            poll: PollConfig::default(),
        }
    }
}

impl Default for NodeEndpoints {
    fn default() -> Self {
        Self {
            base_url: "https://app.brightid.org/node/v6".to_string(),
        }
    }
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.brightid.org/link-verification".to_string(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            timeout_secs: 120,
            max_attempts: None,
        }
    }
}

// ----------------------------------------------------------------------------
// Validation
// ----------------------------------------------------------------------------

impl LinkConfig {
    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(LinkError::config_error("app_id must not be empty"));
        }

        if self.poll.interval_ms == 0 {
            return Err(LinkError::config_error(
                "poll interval must be greater than 0",
            ));
        }

        if self.poll.timeout_secs == 0 {
            return Err(LinkError::config_error(
                "poll timeout must be greater than 0",
            ));
        }

        if let Some(max_attempts) = self.poll.max_attempts {
            if max_attempts == 0 {
                return Err(LinkError::config_error(
                    "poll max_attempts must be greater than 0 when set",
                ));
            }
        }

        url::Url::parse(&self.node.base_url)
            .map_err(|e| LinkError::config_error(format!("invalid node base_url: {}", e)))?;
        url::Url::parse(&self.deep_link.base_url)
            .map_err(|e| LinkError::config_error(format!("invalid deep_link base_url: {}", e)))?;

        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
