//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Green Campus issue intake assistant
#[derive(Parser, Debug)]
#[command(name = "intakectl")]
#[command(about = "Report campus facility issues through a short chat", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides $INTAKE_CONFIG and the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Campus API base URL (overrides config and $INTAKE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Subcommand (if not provided, starts a chat)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive reporting chat
    Chat {
        /// Log tickets instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how a message would be classified
    Classify {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Subcommand to run; bare `intakectl` chats
    pub fn subcommand(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Chat { dry_run: false })
    }
}
