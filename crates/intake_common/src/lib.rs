//! Shared types for the campus issue intake assistant.
//!
//! Everything the dialogue engine and its callers agree on lives here:
//! categories, conversation phases, draft and submitted tickets, the chat
//! history, the keyword rule tables, canned replies, errors and config.

pub mod category;
pub mod config;
pub mod error;
pub mod history;
pub mod intent;
pub mod phase;
pub mod replies;
pub mod ticket;

pub use category::Category;
pub use config::IntakeConfig;
pub use error::{ConfigError, SessionError, SubmitError};
pub use history::{ChatMessage, History, Sender};
pub use intent::{Classification, IntentRules};
pub use phase::Phase;
pub use ticket::{ComplaintTicket, DraftTicket, SubmissionReceipt};
