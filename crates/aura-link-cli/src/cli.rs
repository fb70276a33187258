//! Command-line interface definitions and parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the node API base URL
    #[arg(long)]
    pub node_url: Option<String>,

    /// Override the application identifier
    #[arg(long)]
    pub app_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a linking session, display the QR code, and sponsor the
    /// identity once the wallet app picks it up
    Link {
        /// Skip rendering the QR code (print the link only)
        #[arg(long)]
        no_qr: bool,

        /// Give up if the sponsorship is not confirmed within this many
        /// seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Query the sponsorship status for a public identifier once
    Status {
        /// The appUserId to query, in the configured encoding
        app_user_id: String,
    },
}
