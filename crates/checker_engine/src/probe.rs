use std::error::Error as _;
use std::time::{Duration, Instant};

use checker_core::{Entry, Failure, ResponseInfo, Verdict};
use checker_logging::{checker_debug, checker_trace};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::EngineError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Content-type fragments accepted as plausible media.
///
/// `text` lets through HTML error pages served with status 200; it is kept so
/// results stay comparable with existing reports, but it is a known
/// precision gap.
const MEDIA_CONTENT_TYPE_HINTS: &[&str] = &["video", "application", "text"];

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Upper bound for the whole request, connect included.
    pub timeout: Duration,
    pub user_agent: String,
    pub follow_redirects: bool,
    /// Hops followed before giving up; ignored when redirects are off.
    pub redirect_limit: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            redirect_limit: 10,
        }
    }
}

/// One liveness check against one entry.
///
/// Every network failure is folded into the returned [`Verdict`]; a prober
/// has no error channel.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, entry: &Entry) -> Verdict;
}

/// Probes with a `HEAD` request over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, EngineError> {
        let policy = if settings.follow_redirects {
            reqwest::redirect::Policy::limited(settings.redirect_limit)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .connect_timeout(settings.timeout)
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .redirect(policy)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, entry: &Entry) -> Verdict {
        checker_trace!("probing line {} {}", entry.line_number, entry.url);
        let started = Instant::now();
        let response = match self.client.head(&entry.url).send().await {
            Ok(response) => response,
            Err(err) => {
                let failure = map_reqwest_error(&err);
                checker_debug!("{} unreachable: {}", entry, describe(&err));
                return Verdict::Unreachable(failure);
            }
        };
        let elapsed = started.elapsed();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        let verdict = classify_response(response.status().as_u16(), content_type, elapsed);
        checker_debug!(
            "{} -> {} (status {}, {:?})",
            entry,
            verdict.kind(),
            response.status().as_u16(),
            elapsed
        );
        verdict
    }
}

/// Classify a received response. The content type is matched
/// case-insensitively.
pub fn classify_response(status: u16, content_type: Option<&str>, elapsed: Duration) -> Verdict {
    let info = ResponseInfo {
        status,
        content_type: content_type.map(str::to_ascii_lowercase),
        elapsed,
    };
    if status != StatusCode::OK.as_u16() {
        return Verdict::Unreachable(Failure::HttpStatus(info));
    }
    let plausible = info.content_type.as_deref().is_some_and(|ct| {
        MEDIA_CONTENT_TYPE_HINTS
            .iter()
            .any(|hint| ct.contains(hint))
    });
    if plausible {
        Verdict::Reachable(info)
    } else {
        Verdict::Suspicious(info)
    }
}

fn map_reqwest_error(err: &reqwest::Error) -> Failure {
    if err.is_timeout() {
        return Failure::Timeout;
    }
    if err.is_connect() {
        return Failure::Connection(describe(err));
    }
    Failure::Other(describe(err))
}

/// The error message followed by its source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
