//! Out-of-band notices for the message timeline.
//!
//! A turn returns exactly one reply. Anything the engine has to show
//! before that reply is ready (the "submitting..." interstitial) goes
//! through a [`NoticeSink`] instead.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::debug;

/// Receives interstitial messages as they are produced
pub trait NoticeSink: Send + Sync {
    fn notice(&self, text: &str);
}

/// Discards notices
impl NoticeSink for () {
    fn notice(&self, _text: &str) {}
}

/// Forwards notices to a channel; a closed receiver is not an error
impl NoticeSink for mpsc::UnboundedSender<String> {
    fn notice(&self, text: &str) {
        if self.send(text.to_string()).is_err() {
            debug!("notice receiver dropped");
        }
    }
}

/// Keeps every notice in memory (tests, transcripts)
#[derive(Clone, Default)]
pub struct RecordingNotices {
    notices: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.notices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoticeSink for RecordingNotices {
    fn notice(&self, text: &str) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }
}
