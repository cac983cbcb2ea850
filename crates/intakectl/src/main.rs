//! intakectl - report campus facility issues from the terminal

use anyhow::Result;
use clap::Parser;
use intake_common::IntakeConfig;
use intakectl::cli::{Cli, Commands};
use intakectl::{commands, repl};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        IntakeConfig::load(cli.config.as_deref())?.with_overrides(cli.api_url.clone(), None);
    init_logging(&config);

    match cli.subcommand() {
        Commands::Chat { dry_run } => repl::start_chat(&config, dry_run).await,
        Commands::Classify { text, json } => commands::classify(&text, json),
        Commands::Config => commands::show_config(&config),
    }
}

/// Logs go to stderr so the chat on stdout stays readable. RUST_LOG wins
/// over the configured level.
fn init_logging(config: &IntakeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .without_time()
        .init();
}
