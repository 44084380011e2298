//! Single HTTP calls against the Motion API.
//!
//! The [`Transport`] trait performs exactly one call and reports either the
//! parsed JSON body or a [`TransportFailure`]. It never retries and never
//! classifies; both happen in the layers above it.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default Motion API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.usemotion.com/v1";

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// One outbound call: verb, path relative to the base URL, optional JSON
/// body and query parameters.
///
/// Built once by a resource method and consumed by the pipeline.
///
/// # Examples
///
/// ```
/// use motion_api::RequestUnit;
/// use reqwest::Method;
///
/// let unit = RequestUnit::new(Method::GET, "/tasks")
///     .with_query(vec![("workspaceId".to_string(), "ws_1".to_string())]);
/// assert_eq!(unit.path(), "/tasks");
/// assert!(unit.body().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestUnit {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
}

impl RequestUnit {
    /// Creates a call with no body and no query parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the query parameters. Repeated keys are sent repeatedly.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// The HTTP verb.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path, relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The query parameters.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// A call that did not produce a 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportFailure {
    status: Option<u16>,
    body: Option<Value>,
    reason: String,
}

impl TransportFailure {
    /// A response with a non-2xx status. `reason` is the HTTP reason phrase.
    #[must_use]
    pub fn http(status: u16, body: Option<Value>, reason: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body,
            reason: reason.into(),
        }
    }

    /// No response was received at all.
    #[must_use]
    pub fn network(reason: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            reason: reason.into(),
        }
    }

    /// The HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// The response payload, if one was received.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The HTTP reason phrase or the network error description.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Performs a single call against the API.
#[async_trait::async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Sends `unit` once and returns the parsed body of a 2xx response.
    ///
    /// An empty body reads as JSON `null`.
    async fn send(&self, unit: &RequestUnit) -> std::result::Result<Value, TransportFailure>;
}

/// [`Transport`] backed by `reqwest`, with a fixed base URL and API key.
///
/// The API key is held as a [`SecretString`] and marked sensitive on the
/// header so it never shows up in debug output.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for `base_url`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s), the key is not a
    /// valid header value, or the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &SecretString, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut key =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|_| Error::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The base URL every path is appended to, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, unit), fields(method = %unit.method(), path = %unit.path()))]
    async fn send(&self, unit: &RequestUnit) -> std::result::Result<Value, TransportFailure> {
        let url = format!("{}{}", self.base_url, unit.path());
        let mut request = self.client.request(unit.method().clone(), url);
        if !unit.query().is_empty() {
            request = request.query(unit.query());
        }
        if let Some(body) = unit.body() {
            request = request.json(body);
        }

        let response = request.send().await.map_err(network_failure)?;
        let status = response.status();
        let text = response.text().await.map_err(network_failure);
        read_outcome(status, text)
    }
}

/// Turns a received status and its body (or the failure to read it) into
/// the outcome of the call.
///
/// An error status is kept even when its body could not be read.
fn read_outcome(
    status: StatusCode,
    text: std::result::Result<String, TransportFailure>,
) -> std::result::Result<Value, TransportFailure> {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    let text = match text {
        Ok(text) => text,
        Err(failure) if status.is_success() => return Err(failure),
        Err(failure) => {
            warn!(status = status.as_u16(), error = failure.reason(), "failed to read error body");
            return Err(TransportFailure::http(status.as_u16(), None, reason));
        }
    };
    debug!(status = status.as_u16(), bytes = text.len(), "received response");

    if status.is_success() {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // Non-JSON success bodies are handed up as a string; decoding
        // into the caller's type reports the mismatch.
        return Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)));
    }

    let body = if text.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    };
    Err(TransportFailure::http(status.as_u16(), body, reason))
}

fn network_failure(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::network(format!("request timed out: {err}"))
    } else {
        TransportFailure::network(err.to_string())
    }
}

fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| Error::InvalidBaseUrl {
            url: url.to_string(),
            reason: "scheme must be http or https".to_string(),
        })?;
    if rest.is_empty() {
        return Err(Error::InvalidBaseUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> SecretString {
        SecretString::from("test_key".to_string())
    }

    #[test]
    fn normalize_base_url_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("https://api.usemotion.com/v1/").unwrap(),
            "https://api.usemotion.com/v1"
        );
        assert!(normalize_base_url("api.usemotion.com").is_err());
        assert!(normalize_base_url("https://").is_err());
    }

    #[test]
    fn api_key_is_redacted_from_debug() {
        let transport = HttpTransport::new(DEFAULT_BASE_URL, &key(), DEFAULT_TIMEOUT).unwrap();
        assert!(!format!("{transport:?}").contains("test_key"));
    }

    #[test]
    fn invalid_api_key_rejected() {
        let bad = SecretString::from("line\nbreak".to_string());
        assert!(matches!(
            HttpTransport::new(DEFAULT_BASE_URL, &bad, DEFAULT_TIMEOUT),
            Err(Error::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn send_sets_headers_query_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tasks"))
            .and(header("x-api-key", "test_key"))
            .and(header("content-type", "application/json"))
            .and(query_param("workspaceId", "ws_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"tasks": []})))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&format!("{}/v1", server.uri()), &key(), DEFAULT_TIMEOUT).unwrap();
        let unit = RequestUnit::new(Method::GET, "/tasks")
            .with_query(vec![("workspaceId".to_string(), "ws_1".to_string())]);

        let body = transport.send(&unit).await.unwrap();
        assert_eq!(body, serde_json::json!({"tasks": []}));
    }

    #[tokio::test]
    async fn send_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/tasks/t_1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), &key(), DEFAULT_TIMEOUT).unwrap();
        let body = transport
            .send(&RequestUnit::new(Method::DELETE, "/tasks/t_1"))
            .await
            .unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn send_error_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tasks"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"message": "name is required"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), &key(), DEFAULT_TIMEOUT).unwrap();
        let unit = RequestUnit::new(Method::POST, "/tasks").with_body(serde_json::json!({}));
        let failure = transport.send(&unit).await.unwrap_err();

        assert_eq!(failure.status(), Some(400));
        assert_eq!(failure.reason(), "Bad Request");
        assert_eq!(
            failure.body().and_then(|b| b.get("message")).and_then(Value::as_str),
            Some("name is required")
        );
    }

    #[test]
    fn unreadable_error_body_keeps_status() {
        let failure = read_outcome(
            StatusCode::NOT_FOUND,
            Err(TransportFailure::network("connection reset")),
        )
        .unwrap_err();
        assert_eq!(failure.status(), Some(404));
        assert_eq!(failure.body(), None);
        assert_eq!(failure.reason(), "Not Found");

        let failure = read_outcome(
            StatusCode::UNAUTHORIZED,
            Err(TransportFailure::network("connection reset")),
        )
        .unwrap_err();
        assert_eq!(failure.status(), Some(401));
    }

    #[test]
    fn unreadable_success_body_is_network_failure() {
        let failure = read_outcome(
            StatusCode::OK,
            Err(TransportFailure::network("connection reset")),
        )
        .unwrap_err();
        assert_eq!(failure.status(), None);
        assert_eq!(failure.reason(), "connection reset");
    }

    #[test]
    fn error_body_text_is_kept_when_not_json() {
        let failure = read_outcome(StatusCode::BAD_GATEWAY, Ok("<html>oops</html>".to_string()))
            .unwrap_err();
        assert_eq!(failure.status(), Some(502));
        assert_eq!(failure.body(), Some(&Value::String("<html>oops</html>".to_string())));
    }

    #[tokio::test]
    async fn send_timeout_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&server.uri(), &key(), Duration::from_millis(50)).unwrap();
        let failure = transport
            .send(&RequestUnit::new(Method::GET, "/users/me"))
            .await
            .unwrap_err();
        assert_eq!(failure.status(), None);
        assert!(failure.reason().contains("timed out"));
    }
}
