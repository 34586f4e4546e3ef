use std::fmt;
use std::time::Duration;

use crate::Entry;

/// Coarse classification used for counting and partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeKind {
    Reachable,
    Suspicious,
    Unreachable,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Reachable => write!(f, "reachable"),
            OutcomeKind::Suspicious => write!(f, "suspicious"),
            OutcomeKind::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// What the server answered, when it answered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    pub status: u16,
    /// Lowercased `Content-Type` header value.
    pub content_type: Option<String>,
    pub elapsed: Duration,
}

/// Why an entry was classified as unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// A response arrived with a status other than 200.
    HttpStatus(ResponseInfo),
    Timeout,
    /// DNS, refused/reset connections and TLS handshakes.
    Connection(String),
    Other(String),
    /// The probe itself faulted; the scheduler synthesized this outcome.
    Internal(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::HttpStatus(response) => write!(f, "HTTP {}", response.status),
            Failure::Timeout => write!(f, "timeout"),
            Failure::Connection(_) => write!(f, "connection_error"),
            Failure::Other(message) => write!(f, "other_error: {message}"),
            Failure::Internal(cause) => write!(f, "internal probe error: {cause}"),
        }
    }
}

/// The classified result of one probe. Each variant carries only the fields
/// that are valid for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Status 200 with a plausible media content type.
    Reachable(ResponseInfo),
    /// Status 200 with a missing or implausible content type.
    Suspicious(ResponseInfo),
    Unreachable(Failure),
}

impl Verdict {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Verdict::Reachable(_) => OutcomeKind::Reachable,
            Verdict::Suspicious(_) => OutcomeKind::Suspicious,
            Verdict::Unreachable(_) => OutcomeKind::Unreachable,
        }
    }

    pub fn response(&self) -> Option<&ResponseInfo> {
        match self {
            Verdict::Reachable(response)
            | Verdict::Suspicious(response)
            | Verdict::Unreachable(Failure::HttpStatus(response)) => Some(response),
            Verdict::Unreachable(_) => None,
        }
    }
}

/// An [`Entry`] paired with the verdict of probing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub entry: Entry,
    pub verdict: Verdict,
}

impl Outcome {
    pub fn new(entry: Entry, verdict: Verdict) -> Self {
        Self { entry, verdict }
    }

    pub fn kind(&self) -> OutcomeKind {
        self.verdict.kind()
    }

    pub fn http_status(&self) -> Option<u16> {
        self.verdict.response().map(|response| response.status)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.verdict
            .response()
            .and_then(|response| response.content_type.as_deref())
    }

    /// Present only when a response was received.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.verdict
            .response()
            .map(|response| response.elapsed.as_secs_f64())
    }

    /// Human-readable cause; `None` for reachable entries.
    pub fn detail(&self) -> Option<String> {
        match &self.verdict {
            Verdict::Reachable(_) => None,
            Verdict::Suspicious(_) => Some("unexpected content-type".to_string()),
            Verdict::Unreachable(failure) => Some(failure.to_string()),
        }
    }
}
