//! Command dispatch for the linking CLI

use qrcode::render::unicode;
use qrcode::QrCode;
use tracing::info;

use aura_link_core::AppUserId;
use aura_link_node::{NodeClient, PollOutcome, SponsorshipApi};
use aura_link_runtime::SessionOrchestrator;

use crate::cli::{Cli, Commands};
use crate::config::CliAppConfig;
use crate::error::{CliError, Result};

/// Executes parsed commands against the configured node
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Execute the requested command
    pub async fn execute(cli: Cli, config: CliAppConfig) -> Result<()> {
        match cli.command {
            Commands::Link { no_qr, timeout } => {
                let mut config = config;
                if let Some(timeout_secs) = timeout {
                    config.link.poll.timeout_secs = timeout_secs;
                }
                let show_qr = config.cli.show_qr && !no_qr;
                Self::run_link(config, show_qr).await
            }
            Commands::Status { app_user_id } => Self::run_status(config, app_user_id).await,
        }
    }

    /// Start a session, display the link, then sponsor and poll to a
    /// terminal state
    async fn run_link(config: CliAppConfig, show_qr: bool) -> Result<()> {
        let client = NodeClient::new(&config.link.node)?;
        let orchestrator = SessionOrchestrator::new(config.link, client)?;

        let mut session = orchestrator.start()?;
        info!(session_id = %session.session_id(), "linking session started");

        println!("Scan with the BrightID app, or open the link on your phone:\n");
        if show_qr {
            println!("{}\n", render_qr(session.deep_link())?);
        }
        println!("  {}\n", session.deep_link());

        // Ctrl-C tears the session down instead of leaving the poll running
        let cancel_handle = session.cancel_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel_handle.cancel();
            }
        });

        println!("Waiting for sponsorship confirmation...");
        let outcome = orchestrator.confirm_and_sponsor(&mut session).await?;

        match outcome {
            PollOutcome::Sponsored(_) => {
                println!("Sponsorship confirmed. Identity linked.");
                Ok(())
            }
            PollOutcome::Rejected(status) => {
                println!("Sponsorship rejected by the node:");
                println!("{}", serde_json::to_string_pretty(&status.raw)?);
                Ok(())
            }
            PollOutcome::TimedOut => {
                println!("Sponsorship not confirmed in time; you may retry with a new session.");
                Ok(())
            }
            PollOutcome::Cancelled => {
                println!("Cancelled.");
                Ok(())
            }
        }
    }

    /// One-shot sponsorship status query
    async fn run_status(config: CliAppConfig, app_user_id: String) -> Result<()> {
        config
            .link
            .id_encoding
            .validate(&app_user_id)
            .map_err(aura_link_core::LinkError::from)?;

        let client = NodeClient::new(&config.link.node)?;
        let status = client
            .sponsorship_status(&AppUserId::new(app_user_id))
            .await?;

        println!("state: {:?}", status.state);
        println!("{}", serde_json::to_string_pretty(&status.raw)?);
        Ok(())
    }
}

/// Render a deep link as a terminal QR code
fn render_qr(deep_link: &str) -> Result<String> {
    let code = QrCode::new(deep_link.as_bytes()).map_err(|e| CliError::Qr(e.to_string()))?;
    Ok(code.render::<unicode::Dense1x2>().build())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
