//! HTTP transport for the GitHub REST API.
//!
//! Handles authentication headers, automatic retry with backoff, `Link`
//! header pagination, and parsing error responses into typed errors.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use rand::thread_rng;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, GitHubError};

/// Media type GitHub recommends for REST calls.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned by this client.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Maximum page size accepted by list endpoints.
pub const MAX_PER_PAGE: u32 = 100;

const USER_AGENT_VALUE: &str = concat!("github-assistant/", env!("CARGO_PKG_VERSION"));

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// Same defaults with a different retry budget.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }
}

/// HTTP transport layer with token authentication and retry logic.
pub struct HttpTransport {
    base_url: String,
    client: Client,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root (e.g., "<https://api.github.com>")
    /// * `token` - Personal access or installation token
    /// * `timeout` - Per-request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be created.
    pub fn new(
        base_url: &str,
        token: &str,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| Error::Configuration("token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retry_config: retry_config.unwrap_or_default(),
        })
    }

    /// `GET` a single resource.
    ///
    /// # Errors
    ///
    /// Returns a `GitHubError` on API errors.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::GET, path, None, None::<&()>).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a `GitHubError` on API errors.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::POST, path, None, Some(body)).await
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns a `GitHubError` on API errors.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::PUT, path, None, Some(body)).await
    }

    /// Make a request with automatic retry and decode the JSON response.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - API path (e.g., "/user/repos")
    /// * `params` - Query parameters
    /// * `body` - Request body (for POST/PUT/PATCH)
    ///
    /// # Errors
    ///
    /// Returns a `GitHubError` on API errors.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.send_with_retry(&method, &url, params, body).await?;
        decode_body(response).await
    }

    /// Fetch every page of a list endpoint.
    ///
    /// Follows `Link: <...>; rel="next"` headers until the last page. A
    /// `204 No Content` response (GitHub's answer for e.g. contributors of an
    /// empty repository) yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a `GitHubError` on API errors.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
    ) -> Result<Vec<T>, Error> {
        let per_page = per_page.clamp(1, MAX_PER_PAGE).to_string();
        let first = format!("{}{}", self.base_url, path);
        let first_params = [("per_page", per_page.as_str())];

        let mut items = Vec::new();
        let mut next = Some(first);
        let mut pages = 0u32;

        while let Some(url) = next.take() {
            // Later pages carry their own query string
            let params = (pages == 0).then_some(&first_params[..]);
            let response = self
                .send_with_retry(&Method::GET, &url, params, None::<&()>)
                .await?;
            pages += 1;

            if response.status() == StatusCode::NO_CONTENT {
                break;
            }

            next = next_page_url(response.headers());
            let page: Vec<T> = decode_body(response).await?;
            items.extend(page);
        }

        debug!(path, pages, count = items.len(), "fetched paginated list");
        Ok(items)
    }

    /// Send a request, retrying retryable failures, and return the successful response.
    async fn send_with_retry<B>(
        &self,
        method: &Method,
        url: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&B>,
    ) -> Result<Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.retry_config.max_retries {
            let mut request = self.client.request(method.clone(), url);
            if let Some(p) = params {
                request = request.query(p);
            }
            if let Some(b) = body {
                request = request.json(b);
            }

            match request.send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response);
                    }

                    let error = parse_error_response(response).await;

                    if !self.should_retry(method, &error, attempt) {
                        return Err(error.into());
                    }

                    let wait_time = self.get_backoff_time(attempt, error.retry_after());
                    warn!(
                        %method,
                        url,
                        status = error.status(),
                        attempt,
                        wait_secs = wait_time,
                        "retrying GitHub request"
                    );
                    last_error = Some(error.into());
                    tokio::time::sleep(wait_duration(wait_time)).await;
                }
                Err(e) => {
                    // A write may have been applied unless the connection never opened
                    let replayable = is_replayable(method) || e.is_connect();
                    if !replayable || attempt >= self.retry_config.max_retries {
                        return Err(Error::Http(e.to_string()));
                    }

                    let wait_time = self.get_backoff_time(attempt, None);
                    warn!(%method, url, attempt, error = %e, "request failed, retrying");
                    last_error = Some(Error::Http(e.to_string()));
                    tokio::time::sleep(wait_duration(wait_time)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Http("Request failed after maximum retries".to_string())
        }))
    }

    /// Determine if a failed request should be retried.
    ///
    /// Writes are only retried when the server rejected them unprocessed
    /// (rate limiting); a 5xx answer may follow an applied write.
    fn should_retry(&self, method: &Method, error: &GitHubError, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        let rate_limited =
            error.status() == 429 || matches!(error, GitHubError::RateLimited { .. });
        if !is_replayable(method) {
            return rate_limited;
        }

        self.retry_config.retry_on.contains(&error.status()) || rate_limited
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra).min(self.retry_config.max_backoff).max(0.0);
            }
        }

        let base_wait = self.retry_config.backoff_factor.powi(attempt as i32);

        let jitter_range = base_wait * self.retry_config.jitter;
        let wait_time = if jitter_range.is_finite() && jitter_range > 0.0 {
            let mut rng = thread_rng();
            base_wait + rng.gen_range(-jitter_range..jitter_range)
        } else {
            base_wait
        };

        let wait_time = wait_time.min(self.retry_config.max_backoff);
        if wait_time.is_finite() {
            wait_time.max(0.0)
        } else {
            0.0
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the retry configuration.
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }
}

/// Read a response body and deserialize it as JSON.
async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Http(format!("Failed to read response: {e}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Whether sending `method` twice has the same effect as sending it once.
fn is_replayable(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// Sleep length for a backoff in seconds; out-of-range values saturate.
fn wait_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

/// Percent-encode each `/`-separated segment of a path, keeping the separators.
#[must_use]
pub fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Encode a caller-supplied path that must stay below the endpoint it is appended to.
///
/// Leading and trailing slashes are dropped.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the path is empty or contains an empty,
/// `.`, or `..` segment; URL resolution would collapse those and move the
/// request to another endpoint.
pub fn encode_relative_path(path: &str) -> Result<String, Error> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("path must not be empty".to_string()));
    }
    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(Error::InvalidInput(format!(
            "path '{path}' contains an empty, '.' or '..' segment"
        )));
    }
    Ok(encode_path(trimmed))
}

/// Extract the `rel="next"` target from a `Link` header.
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        let is_next = params
            .split(';')
            .any(|p| p.trim().eq_ignore_ascii_case("rel=\"next\""));
        if !is_next {
            return None;
        }
        let target = target.trim();
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(String::from)
    })
}

/// Seconds to wait according to `Retry-After` or `x-ratelimit-reset`.
fn retry_after_secs(headers: &HeaderMap) -> Option<u32> {
    if let Some(ra) = headers
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u32>().ok())
    {
        return Some(ra);
    }

    let reset = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    u32::try_from(reset.saturating_sub(now)).ok()
}

/// Parse an error response into a typed error.
async fn parse_error_response(response: Response) -> GitHubError {
    let status = response.status();
    let headers = response.headers().clone();
    let data: Value = response.json().await.unwrap_or_else(|_| serde_json::json!({}));
    classify_error(status, &headers, &data)
}

/// Map status, headers, and body of a failed call to a `GitHubError`.
fn classify_error(status: StatusCode, headers: &HeaderMap, data: &Value) -> GitHubError {
    let mut message = data
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| format!("HTTP {}", status.as_u16()), String::from);

    // 422 bodies list per-field problems
    let details: Vec<String> = data
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    e.get("message")
                        .or_else(|| e.get("code"))
                        .and_then(Value::as_str)
                        .map(String::from)
                        .or_else(|| e.as_str().map(String::from))
                })
                .collect()
        })
        .unwrap_or_default();
    if !details.is_empty() {
        message = format!("{message}: {}", details.join("; "));
    }

    let documentation_url = data
        .get("documentation_url")
        .and_then(Value::as_str)
        .map(String::from);
    let request_id = headers
        .get("x-github-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let status_code = status.as_u16();

    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    let secondary_limit = message.to_lowercase().contains("rate limit");

    match status {
        StatusCode::TOO_MANY_REQUESTS => GitHubError::RateLimited {
            status: status_code,
            message,
            retry_after: retry_after_secs(headers).unwrap_or(60),
            documentation_url,
            request_id,
        },
        StatusCode::FORBIDDEN if quota_exhausted || secondary_limit => GitHubError::RateLimited {
            status: status_code,
            message,
            retry_after: retry_after_secs(headers).unwrap_or(60),
            documentation_url,
            request_id,
        },
        StatusCode::UNAUTHORIZED => GitHubError::Authentication {
            status: status_code,
            message,
            documentation_url,
            request_id,
        },
        StatusCode::FORBIDDEN => GitHubError::Authorization {
            status: status_code,
            message,
            documentation_url,
            request_id,
        },
        StatusCode::NOT_FOUND => GitHubError::NotFound {
            status: status_code,
            message,
            documentation_url,
            request_id,
        },
        StatusCode::CONFLICT => GitHubError::Conflict {
            status: status_code,
            message,
            documentation_url,
            request_id,
        },
        s if s.is_server_error() => GitHubError::Server {
            status: status_code,
            message,
            documentation_url,
            request_id,
        },
        _ => GitHubError::Validation {
            status: status_code,
            message,
            documentation_url,
            request_id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_transport(config: RetryConfig) -> HttpTransport {
        HttpTransport::new(
            "https://api.github.com/",
            "ghp_test",
            Duration::from_secs(30),
            Some(config),
        )
        .expect("transport creation should succeed")
    }

    fn error_with_status(status: u16) -> GitHubError {
        classify_error(
            StatusCode::from_u16(status).expect("valid status"),
            &HeaderMap::new(),
            &serde_json::json!({}),
        )
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();

        assert_eq!(config.max_retries, 3);
        assert!((config.backoff_factor - 2.0).abs() < f64::EPSILON);
        assert!(config.retry_on.contains(&429));
        assert!(config.retry_on.contains(&500));
        assert!(config.retry_on.contains(&502));
        assert!(config.retry_on.contains(&503));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = create_test_transport(RetryConfig::default());
        assert_eq!(transport.base_url(), "https://api.github.com");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = HttpTransport::new(
            "https://api.github.com",
            "bad\ntoken",
            Duration::from_secs(30),
            None,
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_should_retry() {
        let transport = create_test_transport(RetryConfig::default());
        let get = Method::GET;

        assert!(transport.should_retry(&get, &error_with_status(429), 0));
        assert!(transport.should_retry(&get, &error_with_status(429), 2));
        assert!(!transport.should_retry(&get, &error_with_status(429), 3));

        assert!(transport.should_retry(&get, &error_with_status(500), 0));
        assert!(transport.should_retry(&get, &error_with_status(502), 0));
        assert!(transport.should_retry(&get, &error_with_status(503), 0));

        assert!(!transport.should_retry(&get, &error_with_status(400), 0));
        assert!(!transport.should_retry(&get, &error_with_status(401), 0));
        assert!(!transport.should_retry(&get, &error_with_status(403), 0));
        assert!(!transport.should_retry(&get, &error_with_status(404), 0));
        assert!(!transport.should_retry(&get, &error_with_status(422), 0));
    }

    #[test]
    fn test_writes_retried_only_when_rate_limited() {
        let transport = create_test_transport(RetryConfig::default());

        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(transport.should_retry(&method, &error_with_status(429), 0));
            assert!(!transport.should_retry(&method, &error_with_status(500), 0));
            assert!(!transport.should_retry(&method, &error_with_status(502), 0));
            assert!(!transport.should_retry(&method, &error_with_status(503), 0));
            assert!(!transport.should_retry(&method, &error_with_status(429), 3));
        }
    }

    #[test]
    fn test_should_retry_exhausted_quota_on_403() {
        let transport = create_test_transport(RetryConfig::default());
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));

        let error = classify_error(StatusCode::FORBIDDEN, &headers, &serde_json::json!({}));

        assert!(matches!(error, GitHubError::RateLimited { status: 403, .. }));
        assert!(transport.should_retry(&Method::GET, &error, 0));
    }

    #[test]
    fn test_backoff_time_exponential() {
        let transport = create_test_transport(RetryConfig {
            backoff_factor: 2.0,
            jitter: 0.0,
            max_backoff: 60.0,
            ..Default::default()
        });

        assert!((transport.get_backoff_time(0, None) - 1.0).abs() < 0.01);
        assert!((transport.get_backoff_time(1, None) - 2.0).abs() < 0.01);
        assert!((transport.get_backoff_time(2, None) - 4.0).abs() < 0.01);
        assert!((transport.get_backoff_time(3, None) - 8.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_with_jitter_stays_in_range() {
        let transport = create_test_transport(RetryConfig {
            backoff_factor: 2.0,
            jitter: 0.1,
            ..Default::default()
        });

        for _ in 0..50 {
            let wait = transport.get_backoff_time(2, None);
            assert!((3.6..=4.4).contains(&wait));
        }
    }

    #[test]
    fn test_backoff_time_respects_retry_after() {
        let transport = create_test_transport(RetryConfig {
            respect_retry_after: true,
            ..Default::default()
        });

        assert!((transport.get_backoff_time(0, Some(30)) - 30.0).abs() < 0.01);
        // Capped at max_backoff
        assert!((transport.get_backoff_time(0, Some(3600)) - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_capped_at_max() {
        let transport = create_test_transport(RetryConfig {
            backoff_factor: 10.0,
            jitter: 0.0,
            max_backoff: 30.0,
            ..Default::default()
        });

        assert!((transport.get_backoff_time(3, None) - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_backoff_time_without_base_wait() {
        let transport = create_test_transport(RetryConfig {
            backoff_factor: 0.0,
            jitter: 0.1,
            ..Default::default()
        });

        assert!(transport.get_backoff_time(1, None).abs() < f64::EPSILON);
        assert!(transport.get_backoff_time(3, None).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backoff_time_never_negative() {
        let transport = create_test_transport(RetryConfig {
            backoff_factor: 2.0,
            jitter: 5.0,
            ..Default::default()
        });

        for _ in 0..50 {
            assert!(transport.get_backoff_time(1, None) >= 0.0);
        }

        let negative_cap = create_test_transport(RetryConfig {
            max_backoff: -1.0,
            ..Default::default()
        });
        assert!(negative_cap.get_backoff_time(0, Some(5)) >= 0.0);
        assert!(negative_cap.get_backoff_time(2, None) >= 0.0);
    }

    #[test]
    fn test_wait_duration_saturates() {
        assert_eq!(wait_duration(1.5), Duration::from_millis(1500));
        assert_eq!(wait_duration(-1.0), Duration::ZERO);
        assert_eq!(wait_duration(f64::NAN), Duration::ZERO);
        assert_eq!(wait_duration(f64::INFINITY), Duration::MAX);
    }

    #[test]
    fn test_encode_relative_path() {
        assert_eq!(
            encode_relative_path("/docs/read me.md/").expect("valid path"),
            "docs/read%20me.md"
        );
        assert_eq!(encode_relative_path(".github/ci.yml").expect("valid path"), ".github/ci.yml");
        assert_eq!(encode_relative_path("a..b/c").expect("valid path"), "a..b/c");
        assert_eq!(encode_relative_path("%2e%2e/x").expect("valid path"), "%252e%252e/x");
        assert_eq!(encode_relative_path("..\\x").expect("valid path"), "..%5Cx");

        for path in ["", "/", "a//b", ".", "./a", "a/.", "..", "x/../../../user/repos"] {
            assert!(
                matches!(encode_relative_path(path), Err(Error::InvalidInput(_))),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("src/main.rs"), "src/main.rs");
        assert_eq!(encode_path("/docs/read me.md"), "docs/read%20me.md");
        assert_eq!(encode_path("a#b/c?d"), "a%23b/c%3Fd");
        assert_eq!(encode_path("notas/ação.txt"), "notas/a%C3%A7%C3%A3o.txt");
    }

    #[test]
    fn test_next_page_url() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://api.github.com/repositories/1/branches?per_page=100&page=2>; rel=\"next\", \
                 <https://api.github.com/repositories/1/branches?per_page=100&page=5>; rel=\"last\"",
            ),
        );

        assert_eq!(
            next_page_url(&headers).as_deref(),
            Some("https://api.github.com/repositories/1/branches?per_page=100&page=2")
        );
    }

    #[test]
    fn test_next_page_url_absent_on_last_page() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://api.github.com/repositories/1/branches?page=1>; rel=\"prev\", \
                 <https://api.github.com/repositories/1/branches?page=1>; rel=\"first\"",
            ),
        );

        assert_eq!(next_page_url(&headers), None);
        assert_eq!(next_page_url(&HeaderMap::new()), None);
    }

    #[test]
    fn test_classify_validation_error_details() {
        let body = serde_json::json!({
            "message": "Repository creation failed.",
            "errors": [
                {"resource": "Repository", "code": "custom", "field": "name",
                 "message": "name already exists on this account"}
            ],
            "documentation_url": "https://docs.github.com/rest/repos/repos#create-a-repository-for-the-authenticated-user"
        });
        let mut headers = HeaderMap::new();
        headers.insert("x-github-request-id", HeaderValue::from_static("ABCD:1"));

        let error = classify_error(StatusCode::UNPROCESSABLE_ENTITY, &headers, &body);

        assert!(matches!(error, GitHubError::Validation { status: 422, .. }));
        assert_eq!(
            error.message(),
            "Repository creation failed.: name already exists on this account"
        );
        assert_eq!(error.request_id(), Some("ABCD:1"));
        assert!(error.documentation_url().is_some());
    }

    #[test]
    fn test_classify_statuses() {
        assert!(matches!(error_with_status(401), GitHubError::Authentication { .. }));
        assert!(matches!(error_with_status(403), GitHubError::Authorization { .. }));
        assert!(matches!(error_with_status(404), GitHubError::NotFound { .. }));
        assert!(matches!(error_with_status(409), GitHubError::Conflict { .. }));
        assert!(matches!(error_with_status(502), GitHubError::Server { .. }));
        assert_eq!(error_with_status(404).message(), "HTTP 404");

        let limited = error_with_status(429);
        assert_eq!(limited.retry_after(), Some(60));
    }

    #[test]
    fn test_retry_after_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", HeaderValue::from_static("7"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1"));

        assert_eq!(retry_after_secs(&headers), Some(7));
    }
}
