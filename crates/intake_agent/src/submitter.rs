//! Ticket submission seam.
//!
//! The dialogue engine only knows [`TicketSubmitter`]. Production uses
//! [`HttpTicketSubmitter`] against the campus complaints API; the CLI's
//! `--dry-run` uses [`DryRunSubmitter`]; tests use [`FakeTicketSubmitter`].
//!
//! Submitters never retry. Timeouts belong here, not in the engine.

use async_trait::async_trait;
use intake_common::config::SubmissionConfig;
use intake_common::{ComplaintTicket, ConfigError, SubmissionReceipt, SubmitError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Longest response body excerpt kept in a [`SubmitError::Status`]
const MAX_BODY_EXCERPT: usize = 200;

// ============================================================================
// Submitter Trait
// ============================================================================

/// Accepts a complete ticket and reports success or failure
#[async_trait]
pub trait TicketSubmitter: Send + Sync {
    /// Submit one ticket. Called at most once per completed draft.
    async fn submit(&self, ticket: &ComplaintTicket) -> Result<SubmissionReceipt, SubmitError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

// ============================================================================
// HTTP Submitter (Production)
// ============================================================================

/// Posts tickets as JSON to the complaints endpoint
pub struct HttpTicketSubmitter {
    endpoint: reqwest::Url,
    token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpTicketSubmitter {
    pub fn new(config: &SubmissionConfig) -> Result<Self, ConfigError> {
        let url = config.endpoint_url();
        let endpoint =
            reqwest::Url::parse(&url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(url));
        }

        let timeout_secs = config.effective_timeout_secs();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint,
            token: config.token.clone(),
            timeout_secs,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn map_request_error(&self, e: reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.timeout_secs)
        } else {
            SubmitError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl TicketSubmitter for HttpTicketSubmitter {
    async fn submit(&self, ticket: &ComplaintTicket) -> Result<SubmissionReceipt, SubmitError> {
        debug!(endpoint = %self.endpoint, category = %ticket.category, "posting complaint");

        let mut request = self.client.post(self.endpoint.clone()).json(ticket);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        Ok(receipt_from_body(&body))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Pull a ticket id out of the API's JSON response, if it has one
pub fn receipt_from_body(body: &str) -> SubmissionReceipt {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return SubmissionReceipt::default(),
    };

    let id = ["id", "_id"]
        .iter()
        .find_map(|key| value.get(*key))
        .and_then(|id| match id {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    SubmissionReceipt { ticket_id: id }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_BODY_EXCERPT {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_BODY_EXCERPT).collect();
    format!("{}...", cut)
}

// ============================================================================
// Dry-run Submitter
// ============================================================================

/// Logs tickets instead of sending them; always succeeds
#[derive(Default)]
pub struct DryRunSubmitter {
    counter: AtomicU64,
}

impl DryRunSubmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketSubmitter for DryRunSubmitter {
    async fn submit(&self, ticket: &ComplaintTicket) -> Result<SubmissionReceipt, SubmitError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            category = %ticket.category,
            location = %ticket.location(),
            description = %ticket.description,
            "dry run: complaint not sent"
        );
        Ok(SubmissionReceipt::with_id(format!("dry-run-{}", n)))
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

// ============================================================================
// Fake Submitter (Testing)
// ============================================================================

/// Deterministic submitter for tests.
///
/// Clones share the record of submitted tickets, so a test can hand one
/// clone to the engine and assert on the other.
///
/// ```rust,ignore
/// let fake = FakeTicketSubmitter::new();
/// let engine = DialogueEngine::new(Arc::new(fake.clone()));
/// // ... drive a full report ...
/// assert_eq!(fake.call_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct FakeTicketSubmitter {
    failure: Option<SubmitError>,
    latency: Option<Duration>,
    submitted: Arc<Mutex<Vec<ComplaintTicket>>>,
}

impl FakeTicketSubmitter {
    /// Submitter that accepts every ticket
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitter that fails every ticket with `error`
    pub fn failing(error: SubmitError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Delay each submission by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of submit calls so far
    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    /// Every ticket received, in order
    pub fn submitted(&self) -> Vec<ComplaintTicket> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ComplaintTicket>> {
        self.submitted.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TicketSubmitter for FakeTicketSubmitter {
    async fn submit(&self, ticket: &ComplaintTicket) -> Result<SubmissionReceipt, SubmitError> {
        let n = {
            let mut submitted = self.lock();
            submitted.push(ticket.clone());
            submitted.len()
        };

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(SubmissionReceipt::with_id(format!("fake-{}", n))),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use intake_common::Category;

    fn ticket() -> ComplaintTicket {
        ComplaintTicket::new(Category::Water, "Bathroom 2nd Floor", "tap is broken")
    }

    #[test]
    fn test_receipt_from_body() {
        assert_eq!(
            receipt_from_body(r#"{"_id": "65f0c0ffee", "type": "Water"}"#).ticket_id,
            Some("65f0c0ffee".to_string())
        );
        assert_eq!(
            receipt_from_body(r#"{"id": 42}"#).ticket_id,
            Some("42".to_string())
        );
        assert_eq!(receipt_from_body("created").ticket_id, None);
        assert_eq!(receipt_from_body("{}").ticket_id, None);
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_BODY_EXCERPT + 3);
        assert_eq!(excerpt("  short  "), "short");
    }

    #[test]
    fn test_http_submitter_rejects_bad_url() {
        let config = SubmissionConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpTicketSubmitter::new(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        let config = SubmissionConfig {
            base_url: "ftp://campus.example.edu".to_string(),
            ..Default::default()
        };
        assert!(HttpTicketSubmitter::new(&config).is_err());
    }

    #[test]
    fn test_http_submitter_endpoint() {
        let submitter = HttpTicketSubmitter::new(&SubmissionConfig::default()).unwrap();
        assert_eq!(submitter.endpoint(), "http://localhost:5000/api/complaints");
    }

    #[tokio::test]
    async fn test_fake_records_calls() {
        let fake = FakeTicketSubmitter::new();
        let handle = fake.clone();

        assert_eq!(handle.call_count(), 0);
        let receipt = fake.submit(&ticket()).await.unwrap();
        assert_eq!(receipt.ticket_id.as_deref(), Some("fake-1"));
        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.submitted()[0], ticket());
    }

    #[tokio::test]
    async fn test_fake_failing() {
        let fake = FakeTicketSubmitter::failing(SubmitError::Timeout(15));
        let err = fake.submit(&ticket()).await.unwrap_err();
        assert_eq!(err, SubmitError::Timeout(15));
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn test_dry_run_always_succeeds() {
        let dry = DryRunSubmitter::new();
        assert_eq!(
            dry.submit(&ticket()).await.unwrap().ticket_id.as_deref(),
            Some("dry-run-1")
        );
        assert_eq!(
            dry.submit(&ticket()).await.unwrap().ticket_id.as_deref(),
            Some("dry-run-2")
        );
    }
}
