//! Non-interactive subcommands.

use anyhow::{Context, Result};
use intake_common::intent::Classification;
use intake_common::{IntakeConfig, IntentRules};

/// `intakectl classify`
pub fn classify(text: &[String], json: bool) -> Result<()> {
    let rules = IntentRules::campus();
    println!("{}", classify_output(&rules, &text.join(" "), json)?);
    Ok(())
}

/// Render how idle-phase rules read `text`
pub fn classify_output(rules: &IntentRules, text: &str, json: bool) -> Result<String> {
    let classification = rules.classify(text);

    if json {
        return serde_json::to_string_pretty(&classification)
            .context("Failed to serialize classification");
    }

    let line = match &classification {
        Classification::Category { category } => {
            format!("category: {} (starts a report, asks for location)", category)
        }
        Classification::ReportIntent => {
            "report intent: no category named, the assistant asks for one".to_string()
        }
        Classification::SmallTalk { topic } => format!(
            "small talk ({}): {}",
            topic,
            rules.small_talk_reply(topic).unwrap_or_default()
        ),
        Classification::Unmatched => "unmatched: the assistant replies with a nudge".to_string(),
    };
    Ok(line)
}

/// `intakectl config`
pub fn show_config(config: &IntakeConfig) -> Result<()> {
    let rendered = config
        .masked()
        .to_toml()
        .context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
