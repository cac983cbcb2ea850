//! Conversational issue intake.
//!
//! [`DialogueEngine`] turns free-text turns into a complaint ticket and
//! submits it once through a [`TicketSubmitter`]. [`session::spawn_session`]
//! runs one engine per conversation on its own task so turns are processed
//! strictly one after another.

pub mod engine;
pub mod notice;
pub mod session;
pub mod submitter;

pub use engine::{ConversationState, DialogueEngine};
pub use notice::{NoticeSink, RecordingNotices};
pub use session::{spawn_session, spawn_with_engine, Notices, SessionHandle};
pub use submitter::{
    DryRunSubmitter, FakeTicketSubmitter, HttpTicketSubmitter, TicketSubmitter,
};
