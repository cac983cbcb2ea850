//! One conversation per task.
//!
//! The engine itself takes `&mut self` per turn and does not guard against
//! a turn arriving while a submission is pending. Running it behind a
//! channel gives that guarantee: turns queue up and are handled strictly
//! in order, and because the task owns the turn future, a caller that
//! stops waiting cannot cancel a submission halfway.

use crate::engine::{ConversationState, DialogueEngine};
use crate::submitter::TicketSubmitter;
use intake_common::SessionError;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Turns that may wait behind a pending one
const SESSION_QUEUE_DEPTH: usize = 16;

/// Receiver for interstitial notices ("Submitting your report...")
pub type Notices = mpsc::UnboundedReceiver<String>;

enum SessionCommand {
    Turn {
        utterance: String,
        reply: oneshot::Sender<String>,
    },
    Snapshot {
        reply: oneshot::Sender<ConversationState>,
    },
}

/// Cloneable handle to a running conversation
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Send one user turn and wait for its reply.
    ///
    /// Notices for this turn are delivered on the [`Notices`] channel
    /// before the reply resolves.
    pub async fn send(&self, utterance: &str) -> Result<String, SessionError> {
        if utterance.trim().is_empty() {
            return Err(SessionError::EmptyUtterance);
        }

        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Turn {
                utterance: utterance.to_string(),
                reply,
            })
            .await
            .map_err(|_| SessionError::Closed)?;

        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Copy of the conversation state after all queued turns
    pub async fn snapshot(&self) -> Result<ConversationState, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;

        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Whether the session task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Start a conversation with the campus rules, returning the handle and
/// the notice stream. Must be called inside a tokio runtime.
pub fn spawn_session(submitter: Arc<dyn TicketSubmitter>) -> (SessionHandle, Notices) {
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let engine = DialogueEngine::new(submitter).with_notices(Arc::new(notice_tx));
    (spawn_with_engine(engine), notice_rx)
}

/// Run an already-configured engine on its own task
pub fn spawn_with_engine(engine: DialogueEngine) -> SessionHandle {
    let (tx, rx) = mpsc::channel(SESSION_QUEUE_DEPTH);
    tokio::spawn(run_session(engine, rx));
    SessionHandle { tx }
}

async fn run_session(mut engine: DialogueEngine, mut rx: mpsc::Receiver<SessionCommand>) {
    debug!("conversation session started");

    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::Turn { utterance, reply } => {
                let text = engine.handle_turn(&utterance).await;
                if reply.send(text).is_err() {
                    debug!("caller stopped waiting for the reply");
                }
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(engine.state().clone());
            }
        }
    }

    debug!(phase = %engine.state().phase(), "conversation session ended");
}
