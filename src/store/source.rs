//! Where a category payload comes from, and how it is read.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::LoadConfig;
use crate::error::{CidxError, Result};

/// A category payload source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched over HTTP(S).
    Url(String),
    /// Read from a local file.
    Path(PathBuf),
    /// The JSON text itself.
    Inline(String),
}

impl CatalogSource {
    /// Classify a source string: `http(s)://` is a URL, text starting with
    /// `[` or `{` is an inline payload, anything else is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else if trimmed.starts_with(['[', '{']) {
            Self::Inline(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Read the payload text.
    ///
    /// URLs are retried per `policy`; every attempt is bounded by
    /// `policy.timeout`. A non-2xx response is a failure.
    pub fn fetch(&self, client: &Client, policy: &RetryPolicy) -> Result<String> {
        match self {
            Self::Url(url) => fetch_with_retry(client, url, policy),
            local => local.read_local(),
        }
    }

    /// Read a file or inline source. URLs are an error here.
    pub fn read_local(&self) -> Result<String> {
        match self {
            Self::Inline(json) => Ok(json.clone()),
            Self::Path(path) => std::fs::read_to_string(path).map_err(|source| {
                CidxError::CatalogRead {
                    path: path.display().to_string(),
                    source,
                }
            }),
            Self::Url(url) => Err(CidxError::Internal(format!(
                "{url} is a remote source and needs an HTTP client"
            ))),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Inline(json) => write!(f, "<inline, {} bytes>", json.len()),
        }
    }
}

/// Retry settings for remote sources.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&LoadConfig::default())
    }
}

impl From<&LoadConfig> for RetryPolicy {
    fn from(config: &LoadConfig) -> Self {
        Self {
            timeout: config.timeout,
            max_retries: config.retries,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
            jitter_factor: 0.25,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (1-based): exponential, capped,
    /// with symmetric jitter.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay_ms as f64;
        let exp_delay = base * 2_f64.powi(attempt.saturating_sub(1) as i32);
        let capped = exp_delay.min(self.max_delay_ms as f64);

        let jitter_range = capped * self.jitter_factor;
        let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
        let final_delay = (capped + jitter).max(0.0);

        Duration::from_millis(final_delay as u64)
    }
}

/// Blocking HTTP client shared by all fetches of one load.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cidx/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(CidxError::Http)
}

fn fetch_with_retry(client: &Client, url: &str, policy: &RetryPolicy) -> Result<String> {
    let mut last_error = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.delay(attempt);
            debug!(url, attempt, delay_ms = delay.as_millis() as u64, "Retrying catalog fetch");
            std::thread::sleep(delay);
        }

        match fetch_once(client, url, policy.timeout) {
            Ok(body) => return Ok(body),
            Err(e) => {
                warn!(url, attempt, error = %e, "Catalog fetch failed");
                let retryable = is_retryable(&e);
                last_error = Some(e);
                if !retryable {
                    break;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| CidxError::Internal(format!("no fetch attempt for {url}"))))
}

fn fetch_once(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    let transport = |e: reqwest::Error| {
        if e.is_timeout() {
            CidxError::Timeout(format!("{url} did not answer within {}ms", timeout.as_millis()))
        } else {
            CidxError::Http(e)
        }
    };

    let response = client.get(url).timeout(timeout).send().map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CidxError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(transport)
}

/// Transport failures, timeouts, 408, 429 and 5xx are worth another attempt.
fn is_retryable(error: &CidxError) -> bool {
    match error {
        CidxError::Http(_) | CidxError::Timeout(_) => true,
        CidxError::HttpStatus { status, .. } => {
            *status == 408 || *status == 429 || *status >= 500
        }
        _ => false,
    }
}
