//! Keyword rule tables for intent classification.
//!
//! Classification is plain case-insensitive substring containment over
//! ordered tables; the first matching rule wins. An utterance that mentions
//! two categories ("the water heater fan") resolves to whichever rule comes
//! first. The tables are data so they can be replaced without touching the
//! dialogue state machine.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maps a keyword set to a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    /// Lower-case substrings, any one of which selects the category
    pub keywords: Vec<String>,
    /// Acknowledgement + location question used when this rule fires on
    /// the idle fast path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// `lowered` must already be lower-case
    pub fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, &self.keywords)
    }
}

/// Canned reply for a small-talk pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmallTalkRule {
    pub topic: String,
    pub keywords: Vec<String>,
    pub reply: String,
}

impl SmallTalkRule {
    pub fn new(topic: impl Into<String>, keywords: &[&str], reply: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            reply: reply.into(),
        }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        contains_any(lowered, &self.keywords)
    }
}

/// Result of classifying an utterance while no report is in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// A category keyword matched (fast path straight to location)
    Category { category: Category },
    /// General report/complaint wording without a category
    ReportIntent,
    /// Greeting or other small talk with a canned answer
    SmallTalk { topic: String },
    /// Nothing matched
    Unmatched,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category { category } => write!(f, "category({})", category),
            Self::ReportIntent => write!(f, "report_intent"),
            Self::SmallTalk { topic } => write!(f, "small_talk({})", topic),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Complete rule set used by the dialogue engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRules {
    /// Idle-phase category detection, in priority order
    pub detect: Vec<CategoryRule>,
    /// Clarification-turn category selection, in priority order
    pub select: Vec<CategoryRule>,
    /// Category used when a clarification answer matches nothing
    pub fallback: Category,
    /// General "I want to report something" wording
    pub report_keywords: Vec<String>,
    /// Small-talk patterns, in priority order
    pub small_talk: Vec<SmallTalkRule>,
}

impl Default for IntentRules {
    fn default() -> Self {
        Self::campus()
    }
}

impl IntentRules {
    /// The campus assistant's rule set
    pub fn campus() -> Self {
        Self {
            detect: vec![
                CategoryRule::new(Category::FoodHygiene, &["food", "hygiene", "mess"])
                    .with_prompt("Got it. 🍔 Reporting a Food/Hygiene issue. \n\nWhere is this? (e.g., Mess Hall A, Canteen)"),
                CategoryRule::new(Category::Cleanliness, &["clean", "dust", "garbage"])
                    .with_prompt("Understood. 🧹 Reporting a Cleanliness issue. \n\nWhich room or area? (e.g., Room 301, Corridor 2)"),
                CategoryRule::new(Category::Water, &["water", "leak"])
                    .with_prompt("Noted. 💧 Reporting a Water issue. \n\nWhere is the leakage/wastage? (e.g., Bathroom 2nd Floor)"),
                CategoryRule::new(Category::Electricity, &["electric", "light", "fan"])
                    .with_prompt("Okay. ⚡ Reporting an Electricity issue. \n\nLocation? (e.g., Room 102, Common Room)"),
            ],
            // The clarification menu answers with single words, so only
            // the stem of each menu entry is checked here.
            select: vec![
                CategoryRule::new(Category::FoodHygiene, &["food"]),
                CategoryRule::new(Category::Cleanliness, &["clean"]),
                CategoryRule::new(Category::Water, &["water"]),
                CategoryRule::new(Category::Electricity, &["elec"]),
            ],
            fallback: Category::Other,
            report_keywords: ["report", "complain", "issue"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            small_talk: vec![
                SmallTalkRule::new(
                    "greeting",
                    &["hello", "hi"],
                    "Hello! 👋 Type an issue to report it instantly.",
                ),
                SmallTalkRule::new(
                    "streak",
                    &["streak"],
                    "🔥 Keep your streak alive by reporting valid issues daily!",
                ),
            ],
        }
    }

    /// Classify an utterance received while idle.
    ///
    /// Category keywords are checked before report wording, which is
    /// checked before small talk.
    pub fn classify(&self, utterance: &str) -> Classification {
        let lowered = utterance.to_lowercase();

        let classification = if let Some(rule) = self.detect.iter().find(|r| r.matches(&lowered)) {
            Classification::Category {
                category: rule.category,
            }
        } else if contains_any(&lowered, &self.report_keywords) {
            Classification::ReportIntent
        } else if let Some(rule) = self.small_talk.iter().find(|r| r.matches(&lowered)) {
            Classification::SmallTalk {
                topic: rule.topic.clone(),
            }
        } else {
            Classification::Unmatched
        };

        debug!(%classification, "classified idle utterance");
        classification
    }

    /// Resolve the category named in a clarification answer
    pub fn select_category(&self, utterance: &str) -> Category {
        let lowered = utterance.to_lowercase();
        self.select
            .iter()
            .find(|r| r.matches(&lowered))
            .map(|r| r.category)
            .unwrap_or(self.fallback)
    }

    /// Fast-path prompt configured for a category, if any
    pub fn prompt_for(&self, category: Category) -> Option<&str> {
        self.detect
            .iter()
            .find(|r| r.category == category)
            .and_then(|r| r.prompt.as_deref())
    }

    /// Canned reply for a small-talk topic
    pub fn small_talk_reply(&self, topic: &str) -> Option<&str> {
        self.small_talk
            .iter()
            .find(|r| r.topic == topic)
            .map(|r| r.reply.as_str())
    }
}

fn contains_any(lowered: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| lowered.contains(k.as_str()))
}
