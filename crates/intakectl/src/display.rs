//! Terminal rendering for the chat.

use indicatif::{ProgressBar, ProgressStyle};
use intake_common::replies::ASSISTANT_NAME;
use intake_common::Phase;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

/// Braille spinner frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// ASCII fallback spinner
const ASCII_FRAMES: &[&str] = &["-", "\\", "|", "/"];

/// Output settings for one terminal
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    color: bool,
}

impl Ui {
    /// Colors only when stdout is a terminal
    pub fn auto() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn use_colors(&self) -> bool {
        self.color
    }

    /// Assistant name plus the Online / Reporting Mode status
    pub fn status_line(&self, phase: Phase) -> String {
        let label = phase.status_label();
        if !self.color {
            return format!("{} · {}", ASSISTANT_NAME, label);
        }
        let dot = if phase.is_reporting() {
            "●".yellow().to_string()
        } else {
            "●".green().to_string()
        };
        format!("{} {} {}", ASSISTANT_NAME.bold(), dot, label.dimmed())
    }

    pub fn print_status(&self, phase: Phase) {
        println!("{}", self.status_line(phase));
    }

    /// Input prompt; the hint changes while a report is being collected
    pub fn print_prompt(&self, phase: Phase) {
        if self.color {
            print!("{} {} ", phase.input_hint().dimmed(), ">".bright_cyan());
        } else {
            print!("{} > ", phase.input_hint());
        }
        let _ = io::stdout().flush();
    }

    pub fn print_bot(&self, text: &str) {
        let body = render_emphasis(text, self.color);
        if self.color {
            println!("{} {}", "[assistant]".bright_green(), body);
        } else {
            println!("[assistant] {}", body);
        }
        println!();
    }

    /// Interstitial messages ("Submitting your report...")
    pub fn print_notice(&self, text: &str) {
        if self.color {
            println!("{} {}", "[assistant]".bright_green(), text.italic().dimmed());
        } else {
            println!("[assistant] {}", text);
        }
    }

    pub fn print_error(&self, text: &str) {
        if self.color {
            eprintln!("{} {}", "error:".red().bold(), text);
        } else {
            eprintln!("error: {}", text);
        }
    }

    /// Spinner shown while the assistant is "typing"
    pub fn typing_spinner(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let (frames, template) = if self.color {
            (SPINNER_FRAMES, "{spinner:.green} {msg}")
        } else {
            (ASCII_FRAMES, "{spinner} {msg}")
        };
        // Templates are constants; a bad one falls back to the default style
        let style = ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(frames);
        spinner.set_style(style);
        spinner.set_message(format!("{} is typing...", ASSISTANT_NAME));
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

/// Render `**bold**` spans; markers are dropped when colors are off
pub fn render_emphasis(text: &str, color: bool) -> String {
    if !text.contains("**") {
        return text.to_string();
    }

    text.split("**")
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 && color {
                part.bold().to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}
