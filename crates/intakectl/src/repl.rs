//! REPL - interactive reporting chat
//!
//! Reads one line per turn, hands it to a conversation session and prints
//! any notices followed by the reply.

use crate::display::Ui;
use anyhow::Result;
use intake_agent::{
    spawn_session, DryRunSubmitter, HttpTicketSubmitter, Notices, SessionHandle, TicketSubmitter,
};
use intake_common::replies;
use intake_common::IntakeConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Words that end the chat instead of being sent as a turn
const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// Start the chat and run until exit/quit or end of input
pub async fn start_chat(config: &IntakeConfig, dry_run: bool) -> Result<()> {
    let submitter: Arc<dyn TicketSubmitter> = if dry_run {
        Arc::new(DryRunSubmitter::new())
    } else {
        Arc::new(HttpTicketSubmitter::new(&config.submission)?)
    };
    info!(
        submitter = submitter.name(),
        endpoint = %config.submission.endpoint_url(),
        "starting chat"
    );

    let (session, notices) = spawn_session(submitter);
    run_chat_loop(&session, notices, config, Ui::auto()).await
}

async fn run_chat_loop(
    session: &SessionHandle,
    mut notices: Notices,
    config: &IntakeConfig,
    ui: Ui,
) -> Result<()> {
    let typing_delay = Duration::from_millis(config.chat.typing_delay_ms);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Seeded greeting
    let state = session.snapshot().await?;
    if let Some(greeting) = state.history().last() {
        ui.print_bot(&greeting.text);
    }
    let mut phase = state.phase();

    loop {
        if config.chat.show_status {
            ui.print_status(phase);
        }
        ui.print_prompt(phase);

        let input = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                println!();
                break;
            }
            Err(e) => {
                ui.print_error(&format!("Error reading input: {}", e));
                break;
            }
        };

        if input.trim().is_empty() {
            continue;
        }
        if is_exit(&input) {
            break;
        }

        let spinner = ui.typing_spinner();
        tokio::time::sleep(typing_delay).await;

        let turn = session.send(&input);
        tokio::pin!(turn);
        let reply = loop {
            tokio::select! {
                biased;
                Some(notice) = notices.recv() => {
                    spinner.suspend(|| ui.print_notice(&notice));
                }
                reply = &mut turn => break reply,
            }
        };
        spinner.finish_and_clear();

        ui.print_bot(&reply?);
        phase = session.snapshot().await?.phase();
    }

    ui.print_bot(&replies::farewell());
    Ok(())
}

fn is_exit(input: &str) -> bool {
    let word = input.trim().to_lowercase();
    EXIT_WORDS.contains(&word.as_str())
}
