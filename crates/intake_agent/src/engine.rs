//! Dialogue engine: intent classification plus slot filling.
//!
//! One engine holds one conversation. Each call to
//! [`DialogueEngine::handle_turn`] classifies the utterance against the
//! current phase, fills at most one slot, moves to the next phase and
//! returns exactly one reply. When the last slot is filled the engine
//! emits a "submitting" notice, submits the ticket once, and resets to
//! idle whatever the outcome.
//!
//! Phase table:
//!
//! | phase                | input                       | next                 |
//! |----------------------|-----------------------------|----------------------|
//! | idle                 | category keyword            | awaiting-location    |
//! | idle                 | report wording              | awaiting-category    |
//! | idle                 | anything else               | idle                 |
//! | awaiting-category    | anything (fallback Other)   | awaiting-location    |
//! | awaiting-location    | anything, taken verbatim    | awaiting-description |
//! | awaiting-description | anything, taken verbatim    | submitting -> idle   |

use crate::notice::NoticeSink;
use crate::submitter::TicketSubmitter;
use intake_common::intent::Classification;
use intake_common::replies;
use intake_common::{ChatMessage, DraftTicket, History, IntentRules, Phase};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the engine knows about the conversation.
///
/// Read-only outside this module; only turns change it.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationState {
    phase: Phase,
    draft: DraftTicket,
    history: History,
}

impl ConversationState {
    /// Idle, empty draft, history seeded with the welcome message
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            draft: DraftTicket::new(),
            history: History::seeded(replies::welcome()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn draft(&self) -> &DraftTicket {
        &self.draft
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Back to idle with an empty draft. The history is the display
    /// timeline and survives.
    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.draft = DraftTicket::new();
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-conversation intake engine
pub struct DialogueEngine {
    state: ConversationState,
    rules: IntentRules,
    submitter: Arc<dyn TicketSubmitter>,
    notices: Arc<dyn NoticeSink>,
}

impl DialogueEngine {
    /// Engine with the campus rule set and notices discarded
    pub fn new(submitter: Arc<dyn TicketSubmitter>) -> Self {
        Self {
            state: ConversationState::new(),
            rules: IntentRules::campus(),
            submitter,
            notices: Arc::new(()),
        }
    }

    /// Send interstitial notices to `notices`
    pub fn with_notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = notices;
        self
    }

    /// Replace the keyword rule tables
    pub fn with_rules(mut self, rules: IntentRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn rules(&self) -> &IntentRules {
        &self.rules
    }

    /// Process one user turn and return the reply to display.
    ///
    /// `utterance` is taken as typed; callers drop empty input before it
    /// gets here.
    pub async fn handle_turn(&mut self, utterance: &str) -> String {
        self.state.history.push(ChatMessage::user(utterance));

        let reply = match self.state.phase {
            Phase::Idle => self.on_idle(utterance),
            Phase::AwaitingCategory => self.on_category(utterance),
            Phase::AwaitingLocation => self.on_location(utterance),
            Phase::AwaitingDescription => self.on_description(utterance).await,
            Phase::Submitting => self.on_abandoned_submission(),
        };

        self.state.history.push(ChatMessage::bot(reply.clone()));
        reply
    }

    fn on_idle(&mut self, utterance: &str) -> String {
        match self.rules.classify(utterance) {
            Classification::Category { category } => {
                self.state.draft.fill_category(category);
                self.transition(Phase::AwaitingLocation);
                self.rules
                    .prompt_for(category)
                    .map(str::to_string)
                    .unwrap_or_else(|| replies::confirm_category(category))
            }
            Classification::ReportIntent => {
                self.transition(Phase::AwaitingCategory);
                replies::ask_category()
            }
            Classification::SmallTalk { topic } => self
                .rules
                .small_talk_reply(&topic)
                .unwrap_or(replies::NUDGE)
                .to_string(),
            Classification::Unmatched => replies::NUDGE.to_string(),
        }
    }

    fn on_category(&mut self, utterance: &str) -> String {
        let category = self.rules.select_category(utterance);
        self.state.draft.fill_category(category);
        self.transition(Phase::AwaitingLocation);
        replies::confirm_category(category)
    }

    fn on_location(&mut self, utterance: &str) -> String {
        self.state.draft.fill_location(utterance);
        self.transition(Phase::AwaitingDescription);
        replies::ASK_DESCRIPTION.to_string()
    }

    async fn on_description(&mut self, utterance: &str) -> String {
        self.state.draft.fill_description(utterance);

        let Some(ticket) = self.state.draft.to_ticket() else {
            // Only reachable if the slot order was broken
            warn!(draft = ?self.state.draft, "incomplete draft at submission, discarding");
            self.state.reset();
            return replies::SUBMIT_FAILED.to_string();
        };

        self.transition(Phase::Submitting);
        self.state
            .history
            .push(ChatMessage::bot(replies::SUBMITTING));
        self.notices.notice(replies::SUBMITTING);

        let outcome = self.submitter.submit(&ticket).await;
        self.state.reset();

        match outcome {
            Ok(receipt) => {
                info!(
                    submitter = self.submitter.name(),
                    category = %ticket.category,
                    location = %ticket.location(),
                    ticket_id = receipt.ticket_id.as_deref().unwrap_or("-"),
                    "complaint submitted"
                );
                replies::submitted(&ticket)
            }
            Err(e) => {
                warn!(
                    submitter = self.submitter.name(),
                    category = %ticket.category,
                    transient = e.is_transient(),
                    error = %e,
                    "complaint submission failed, draft discarded"
                );
                replies::SUBMIT_FAILED.to_string()
            }
        }
    }

    /// A turn found the previous submission still marked in flight, which
    /// means the turn that started it was dropped before the submitter
    /// answered. The outcome is unknown, so nothing is re-sent.
    fn on_abandoned_submission(&mut self) -> String {
        warn!(draft = ?self.state.draft, "previous submission was abandoned mid-flight");
        self.state.reset();
        replies::submission_interrupted()
    }

    fn transition(&mut self, to: Phase) {
        debug!(from = %self.state.phase, to = %to, "phase transition");
        self.state.phase = to;
    }
}
