//! Motion API client.
//!
//! This module provides [`MotionClient`], the single choke point for every
//! outbound call. Resource methods live in [`crate::resources`] and all go
//! through [`MotionClient::request`].

use std::sync::Arc;
use std::time::Duration;

use motion_protocol::Page;
use reqwest::Method;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ApiError, Error, Result};
use crate::pipeline;
use crate::queue::{DEFAULT_SAFETY_PERCENT, DEFAULT_WINDOW, ThroughputQueue};
use crate::retry::RetryPolicy;
use crate::transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HttpTransport, RequestUnit, Transport};

/// Default nominal quota, in requests per minute.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 12;

/// Everything needed to build a [`MotionClient`].
///
/// # Examples
///
/// ```
/// use secrecy::SecretString;
/// use motion_api::ClientSettings;
///
/// let settings = ClientSettings::new(SecretString::from("key".to_string()));
/// assert_eq!(settings.base_url, "https://api.usemotion.com/v1");
/// assert_eq!(settings.rate_limit_per_minute, 12);
/// ```
#[derive(Debug)]
pub struct ClientSettings {
    /// Base URL every path is appended to.
    pub base_url: String,
    /// Value of the `X-API-Key` header.
    pub api_key: SecretString,
    /// Nominal account quota per minute.
    pub rate_limit_per_minute: u32,
    /// Share of the quota actually used, in percent.
    pub safety_percent: u32,
    /// Retry policy for failed attempts.
    pub retry: RetryPolicy,
    /// Timeout of a single HTTP call.
    pub timeout: Duration,
    /// Rolling window the quota applies to.
    pub window: Duration,
}

impl ClientSettings {
    /// Settings with the default base URL, quota, retry policy and timeout.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            safety_percent: DEFAULT_SAFETY_PERCENT,
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            window: DEFAULT_WINDOW,
        }
    }

    fn queue(&self) -> ThroughputQueue {
        ThroughputQueue::new(
            crate::queue::effective_cap(self.rate_limit_per_minute, self.safety_percent),
            self.window,
        )
    }
}

/// Client for the Motion REST API.
///
/// Every call is serialized through one [`ThroughputQueue`] lane, admitted
/// against the rolling rate-limit window, and retried per the
/// [`RetryPolicy`]. Cloning is cheap; clones share the same queue.
///
/// # Security
///
/// The API key is kept in a [`SecretString`] and only exposed when the
/// HTTP client is built.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use motion_api::{ClientSettings, MotionClient};
///
/// # async fn example() -> motion_api::Result<()> {
/// let client = MotionClient::new(ClientSettings::new(SecretString::from("key".to_string())))?;
/// let me = client.get_current_user().await?;
/// println!("signed in as {}", me.display_name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MotionClient {
    transport: Arc<dyn Transport>,
    queue: Arc<ThroughputQueue>,
    retry: RetryPolicy,
}

impl MotionClient {
    /// Creates a client that talks HTTP to `settings.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or API key is unusable, or the HTTP
    /// client cannot be built.
    #[instrument(skip(settings), fields(base_url = %settings.base_url))]
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let transport = HttpTransport::new(&settings.base_url, &settings.api_key, settings.timeout)?;
        let queue = settings.queue();
        debug!(cap = queue.cap(), "creating Motion client");
        Ok(Self::with_transport(Arc::new(transport), queue, settings.retry))
    }

    /// Creates a client on top of any [`Transport`].
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        queue: ThroughputQueue,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            queue: Arc::new(queue),
            retry,
        }
    }

    /// The queue every call goes through.
    #[must_use]
    pub fn queue(&self) -> &ThroughputQueue {
        &self.queue
    }

    /// Runs one call through the queue and the retry loop.
    ///
    /// Resolves exactly once: with the body of the first successful attempt
    /// or with the error of the last one.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the final attempt.
    #[instrument(skip(self, unit), fields(method = %unit.method(), path = %unit.path()))]
    pub async fn execute(&self, unit: RequestUnit) -> std::result::Result<Value, ApiError> {
        let transport = self.transport.as_ref();
        let retry = &self.retry;
        let unit = &unit;
        self.queue
            .enqueue(|lane| pipeline::run(transport, retry, lane, unit))
            .await
    }

    /// Sends a request and decodes the response into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the call fails and [`Error::Decode`] if the
    /// response does not match `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let mut unit = RequestUnit::new(method, path).with_query(query);
        if let Some(body) = body {
            unit = unit.with_body(body);
        }
        let value = self.execute(unit).await?;
        serde_json::from_value(value).map_err(|source| Error::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None, Vec::new()).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(path, body)?;
        self.request(Method::POST, path, Some(body), Vec::new()).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(path, body)?;
        self.request(Method::PATCH, path, Some(body), Vec::new()).await
    }

    /// Sends a `DELETE`; whatever body comes back is discarded.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.execute(RequestUnit::new(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Fetches one page of a list endpoint whose items live under `key`.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
        key: &str,
    ) -> Result<Page<T>> {
        let value = self
            .execute(RequestUnit::new(Method::GET, path).with_query(query))
            .await?;
        Page::from_value(value, key).map_err(|source| Error::Payload {
            path: path.to_string(),
            source,
        })
    }
}

fn encode<B: Serialize + ?Sized>(path: &str, body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|source| Error::Encode {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::ScriptedTransport;
    use crate::transport::TransportFailure;
    use serde_json::json;
    use tokio::time::Instant;

    fn client(transport: &Arc<ScriptedTransport>, cap: usize) -> MotionClient {
        MotionClient::with_transport(
            Arc::clone(transport) as Arc<dyn Transport>,
            ThroughputQueue::new(cap, Duration::from_secs(60)),
            RetryPolicy::new(3, Duration::from_secs(5)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn retryable_failure_is_attempted_three_times() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportFailure::http(500, None, "Internal Server Error")),
            Err(TransportFailure::http(502, None, "Bad Gateway")),
            Err(TransportFailure::http(503, Some(json!({"message": "down"})), "Service Unavailable")),
            Ok(json!({"never": "reached"})),
        ]));
        let client = client(&transport, 10);

        let err = client
            .execute(RequestUnit::new(Method::GET, "/workspaces"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.message(), "API error (503): down");
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_is_attempted_once() {
        let transport = Arc::new(ScriptedTransport::new(vec![Err(TransportFailure::http(
            404,
            Some(json!({"message": "no such task"})),
            "Not Found",
        ))]));
        let client = client(&transport, 10);

        let err = client
            .execute(RequestUnit::new(Method::GET, "/tasks/t_404"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_backoff_is_linear() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportFailure::http(500, None, "Internal Server Error")),
            Err(TransportFailure::network("connection reset")),
            Ok(json!({"ok": true})),
        ]));
        let client = client(&transport, 10);

        let value = client
            .execute(RequestUnit::new(Method::GET, "/users/me"))
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));

        let offsets = transport.offsets();
        assert_eq!(offsets[1] - offsets[0], Duration::from_secs(5));
        assert_eq!(offsets[2] - offsets[1], Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_backoff_is_flat() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportFailure::http(429, None, "Too Many Requests")),
            Err(TransportFailure::http(429, None, "Too Many Requests")),
            Err(TransportFailure::http(429, None, "Too Many Requests")),
        ]));
        let client = client(&transport, 10);

        let err = client
            .execute(RequestUnit::new(Method::GET, "/tasks"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimited);

        let offsets = transport.offsets();
        assert_eq!(offsets[1] - offsets[0], Duration::from_secs(10));
        assert_eq!(offsets[2] - offsets[1], Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn ten_per_minute_admits_eight_then_waits() {
        let transport = Arc::new(ScriptedTransport::repeating(Ok(json!({}))));
        let client = MotionClient::with_transport(
            Arc::clone(&transport) as Arc<dyn Transport>,
            ThroughputQueue::from_rate_limit(10, 80),
            RetryPolicy::default(),
        );
        let start = Instant::now();

        let calls = (0..9).map(|i| {
            let client = client.clone();
            async move {
                client
                    .execute(RequestUnit::new(Method::GET, format!("/tasks/t_{i}")))
                    .await
            }
        });
        let results = futures_join_all(calls).await;
        assert!(results.iter().all(std::result::Result::is_ok));

        let offsets = transport.offsets();
        assert_eq!(offsets.len(), 9);
        assert!(offsets[..8].iter().all(|&at| at == Duration::ZERO));
        assert_eq!(offsets[8], Duration::from_secs(60));
        assert_eq!(Instant::now() - start, Duration::from_secs(60));

        let paths = transport.paths();
        let expected: Vec<String> = (0..9).map(|i| format!("/tasks/t_{i}")).collect();
        assert_eq!(paths, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_count_against_the_window() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(TransportFailure::http(500, None, "Internal Server Error")),
            Ok(json!({"id": "a"})),
            Ok(json!({"id": "b"})),
        ]));
        let client = client(&transport, 2);

        client
            .execute(RequestUnit::new(Method::GET, "/tasks/a"))
            .await
            .unwrap();
        client
            .execute(RequestUnit::new(Method::GET, "/tasks/b"))
            .await
            .unwrap();

        let offsets = transport.offsets();
        assert_eq!(offsets[1], Duration::from_secs(5));
        // two calls already started in the window opened at 0s
        assert_eq!(offsets[2], Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn every_request_resolves_once() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(json!(1)),
            Err(TransportFailure::http(401, None, "Unauthorized")),
            Ok(json!(3)),
        ]));
        let client = client(&transport, 10);

        let mut outcomes = Vec::new();
        for _ in 0..3 {
            outcomes.push(client.execute(RequestUnit::new(Method::GET, "/x")).await);
        }
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], Ok(json!(1)));
        assert_eq!(outcomes[1].as_ref().unwrap_err().kind(), ErrorKind::Auth);
        assert_eq!(outcomes[2], Ok(json!(3)));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn request_decodes_or_reports_path() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(json!({"id": "u_1", "email": "ada@example.com"})),
            Ok(json!("not a user")),
        ]));
        let client = client(&transport, 10);

        let user: motion_protocol::User = client.get("/users/me").await.unwrap();
        assert_eq!(user.id, "u_1");

        let err = client
            .get::<motion_protocol::User>("/users/me")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode { ref path, .. } if path == "/users/me"));
        assert_eq!(err.kind(), None);
    }

    async fn futures_join_all<F: std::future::Future>(futures: impl Iterator<Item = F>) -> Vec<F::Output>
    where
        F: Send + 'static,
        F::Output: Send + 'static,
    {
        let handles: Vec<_> = futures.map(tokio::spawn).collect();
        let mut outputs = Vec::with_capacity(handles.len());
        for handle in handles {
            outputs.push(handle.await.expect("task panicked"));
        }
        outputs
    }
}
