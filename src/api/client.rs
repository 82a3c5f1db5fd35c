//! HTTP API Client
//!
//! Verb-level access to the backend REST API. The client attaches the
//! current session token as a bearer credential and retries idempotent
//! requests on transient failures.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::time::Duration;

use super::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::session::SessionContext;

/// Upper bound on a server-requested `Retry-After` wait
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Retry behaviour for idempotent requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Base backoff; attempt `n` waits `n² × base`
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff * attempt.pow(2)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

/// REST API client bound to a base URL and a session context
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
    retry: RetryPolicy,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig, session: SessionContext) -> ApiResult<Self> {
        let builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));

        let http = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.base_url),
            session,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                backoff: Duration::from_millis(config.retry_backoff_ms),
            },
        })
    }

    /// Override the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session context credentials are read from
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.execute(Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.execute(Method::PUT, path, Some(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.execute(Method::PATCH, path, Some(body)).await
    }

    /// DELETE; whatever body the backend returns is discarded
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute::<IgnoredAny>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    /// Send a request, retrying idempotent methods on transient failures
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let retries = if is_idempotent(&method) {
            self.retry.max_retries
        } else {
            0
        };

        let mut attempt = 0;
        loop {
            tracing::debug!(method = %method, url = %url, attempt, "Sending API request");

            let (result, retry_after) = match self.send_once(&method, &url, body.as_ref()).await {
                Ok(response) => read_response(response).await,
                Err(e) => (Err(e), None),
            };

            match result {
                Err(e) if e.is_transient() && attempt < retries => {
                    attempt += 1;
                    let delay = retry_after.unwrap_or_else(|| self.retry.delay_for(attempt));
                    tracing::warn!(
                        method = %method,
                        url = %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient API failure, retrying"
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    tracing::debug!(method = %method, url = %url, error = %e, "API request failed");
                    return Err(e);
                }
                Ok(text) => return decode(&text),
            }
        }
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> ApiResult<Response> {
        let mut request = self.http.request(method.clone(), url);

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Read a response into its body text, or into an error plus any
/// `Retry-After` hint the server gave
async fn read_response(response: Response) -> (ApiResult<String>, Option<Duration>) {
    let status = response.status();

    if status.is_success() {
        return (response.text().await.map_err(ApiError::from), None);
    }

    let retry_after = retry_after(response.headers());
    let text = response.text().await.unwrap_or_default();
    (Err(ApiError::from_status(status.as_u16(), &text)), retry_after)
}

/// Delay requested by a `Retry-After` header in seconds, capped at
/// [`MAX_RETRY_AFTER_SECS`]. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| Duration::from_secs(secs.min(MAX_RETRY_AFTER_SECS)))
}

/// Decode a JSON body; an empty body reads as `null`
fn decode<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let text = text.trim();
    let text = if text.is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(ApiError::Encode)
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    gloo_timers::future::sleep(delay).await;
}
