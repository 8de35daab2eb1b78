//! Notion REST API client.
//!
//! Provides a sync HTTP client for the public Notion API with bearer token
//! authentication. Rate-limited and server-error responses are retried.

mod blocks;
mod pages;
mod search;

use std::time::Duration;

use mdnotion_config::{NotionConfig, UploadConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use ureq::Agent;
use ureq::http::Response;

use crate::error::NotionError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Delay before the first retry when the server gives no `Retry-After`.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Notion REST API client.
pub struct NotionClient {
    agent: Agent,
    base_url: String,
    version: String,
    token: String,
    max_retries: u32,
}

#[derive(Debug, Clone, Copy)]
enum Method {
    Post,
    Patch,
}

impl NotionClient {
    /// Create client for the given API base URL.
    ///
    /// # Arguments
    /// * `base_url` - Notion API base URL (e.g. `https://api.notion.com/v1`)
    /// * `version` - value sent as the `Notion-Version` header
    /// * `token` - integration token
    #[must_use]
    pub fn new(base_url: &str, version: &str, token: &str) -> Self {
        Self {
            agent: build_agent(Duration::from_secs(DEFAULT_TIMEOUT)),
            base_url: base_url.trim_end_matches('/').to_owned(),
            version: version.to_owned(),
            token: token.to_owned(),
            max_retries: 0,
        }
    }

    /// Create client from config values.
    #[must_use]
    pub fn from_config(notion: &NotionConfig, upload: &UploadConfig) -> Self {
        Self::new(&notion.endpoint, &notion.version, &notion.token)
            .timeout(Duration::from_secs(notion.timeout_secs))
            .max_retries(upload.max_retries)
    }

    /// Set the global request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    /// Set how many times a rate-limited or failed request is retried.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a JSON body and decode the JSON response, retrying when allowed.
    fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, NotionError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            let request = match method {
                Method::Post => self.agent.post(&url),
                Method::Patch => self.agent.patch(&url),
            };
            let response = request
                .header("Authorization", &format!("Bearer {}", self.token))
                .header("Notion-Version", &self.version)
                .header("Accept", "application/json")
                .send_json(body)?;

            let status = response.status().as_u16();
            let retry_after = retry_after(&response);
            let text = response
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read response body)".to_owned());

            if status < 400 {
                return Ok(serde_json::from_str(&text)?);
            }

            if let Some(delay) = retry_delay(attempt, self.max_retries, status, retry_after) {
                attempt += 1;
                warn!(
                    "{:?} {} returned {}, retrying in {:?} (attempt {}/{})",
                    method, url, status, delay, attempt, self.max_retries
                );
                std::thread::sleep(delay);
                continue;
            }

            return Err(NotionError::HttpResponse { status, body: text });
        }
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Rate limiting and transient server errors.
fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Delay before the next attempt, or `None` when the response is final.
///
/// `attempt` counts the retries already made.
fn retry_delay(
    attempt: u32,
    max_retries: u32,
    status: u16,
    retry_after: Option<Duration>,
) -> Option<Duration> {
    if attempt >= max_retries || !is_retryable(status) {
        return None;
    }
    Some(retry_after.unwrap_or_else(|| backoff(attempt + 1)))
}

/// Linear backoff for the given 1-based retry attempt.
fn backoff(attempt: u32) -> Duration {
    RETRY_BASE_DELAY * attempt
}

/// `Retry-After` header in whole seconds.
fn retry_after<B>(response: &Response<B>) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .map(Duration::from_secs)
}
