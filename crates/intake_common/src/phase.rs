//! Conversation phases of the intake dialogue.

use serde::{Deserialize, Serialize};

/// Which slot the dialogue is currently trying to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No report in progress
    #[default]
    Idle,
    /// User asked to report but named no category yet
    AwaitingCategory,
    /// Category known, waiting for where it happened
    AwaitingLocation,
    /// Location known, waiting for what happened
    AwaitingDescription,
    /// Ticket handed to the submission service, outcome pending
    Submitting,
}

impl Phase {
    /// Any phase other than idle means a report is being collected
    pub fn is_reporting(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Status line shown next to the assistant name
    pub fn status_label(&self) -> &'static str {
        if self.is_reporting() {
            "Reporting Mode"
        } else {
            "Online"
        }
    }

    /// Placeholder for the input box
    pub fn input_hint(&self) -> &'static str {
        if self.is_reporting() {
            "Type answer..."
        } else {
            "Report an issue..."
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingCategory => write!(f, "awaiting-category"),
            Self::AwaitingLocation => write!(f, "awaiting-location"),
            Self::AwaitingDescription => write!(f, "awaiting-description"),
            Self::Submitting => write!(f, "submitting"),
        }
    }
}
