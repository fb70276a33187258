//! CLI configuration management
//!
//! Layers a small amount of CLI-specific configuration on top of the core
//! `LinkConfig`, loaded from a TOML file with command-line overrides applied
//! afterwards.

use serde::{Deserialize, Serialize};

use aura_link_core::{AppId, LinkConfig};

use crate::cli::Cli;
use crate::error::{CliError, Result};

// ----------------------------------------------------------------------------
// CLI Application Configuration
// ----------------------------------------------------------------------------

/// Complete configuration for the linking CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliAppConfig {
    /// Core linking flow configuration
    pub link: LinkConfig,

    /// CLI-specific configuration
    pub cli: CliConfig,
}

/// CLI-specific configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Enable verbose logging output
    pub verbose: bool,

    /// Render the deep link as a terminal QR code
    pub show_qr: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            show_qr: true,
        }
    }
}

// ----------------------------------------------------------------------------
// Configuration Loading Logic
// ----------------------------------------------------------------------------

impl CliAppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: CliAppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides, which take priority over the file
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            self.cli.verbose = true;
        }
        if let Some(node_url) = &cli.node_url {
            self.link.node.base_url = node_url.clone();
        }
        if let Some(app_id) = &cli.app_id {
            self.link.app_id = AppId::new(app_id.clone());
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> Result<()> {
        self.link
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
