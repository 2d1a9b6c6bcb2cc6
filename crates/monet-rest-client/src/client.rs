//! Main REST API client implementation

use std::time::Duration;

use monet_api_contract::*;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::AuthConfig;
use crate::config::MonetConfig;
use crate::error::{ConfigError, MonetClientError, RestClientResult};
use crate::stream::{Submission, SubmitMode, TaskStream};

pub const CREATE_TASK_ASYNC_PATH: &str = "/api/v1/tasks/async";
pub const CREATE_TASK_SYNC_PATH: &str = "/api/v1/tasks/sync";
pub const LIST_TASKS_PATH: &str = "/api/v1/tasks/list";
pub const TASKS_PATH: &str = "/api/v1/tasks";

/// REST API client for the Monet generation service
///
/// Cheap to clone; clones share the connection pool. Holds no mutable state,
/// so calls may run concurrently.
#[derive(Debug, Clone)]
pub struct RestClient {
    http_client: HttpClient,
    base_url: Url,
    auth: AuthConfig,
    timeout: Duration,
}

impl RestClient {
    /// Create a new REST client. Fails before any network activity when the
    /// configuration is malformed.
    pub fn new(config: MonetConfig) -> RestClientResult<Self> {
        let settings = config.validate()?;

        let http_client = HttpClient::builder()
            .user_agent(concat!("monet-rest-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(
            base_url = %settings.base_url,
            timeout_ms = settings.timeout.as_millis() as u64,
            "created Monet client"
        );

        Ok(Self {
            http_client,
            base_url: settings.base_url,
            auth: AuthConfig::new(settings.api_key),
            timeout: settings.timeout,
        })
    }

    /// Create a client from the `MONET_*` environment variables
    pub fn from_env() -> RestClientResult<Self> {
        Self::new(MonetConfig::from_env()?)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create a task and return as soon as the service has accepted it
    pub async fn create_task(&self, request: &CreateTaskRequest) -> RestClientResult<Task> {
        self.post(CREATE_TASK_ASYNC_PATH, request).await
    }

    /// Create a task and keep the response open, streaming progress events
    /// until the service closes it.
    ///
    /// The timeout covers the response headers only.
    #[instrument(level = "debug", skip_all, fields(task_type = %request.task_type))]
    pub async fn create_task_stream(&self, request: &CreateTaskRequest) -> RestClientResult<TaskStream> {
        let url = self.endpoint(CREATE_TASK_SYNC_PATH)?;
        let builder = self.build_request(Method::POST, url, Some(request), None)?;

        let response = tokio::time::timeout(self.timeout, builder.send())
            .await
            .map_err(|_| self.timed_out())??;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::request_failed(response).await);
        }
        if response.content_length() == Some(0) {
            warn!(%status, "streaming response has no body");
            return Err(MonetClientError::EmptyStream);
        }

        debug!(%status, "streaming response opened");
        Ok(TaskStream::from_response(response))
    }

    /// Submit a task in the given mode
    pub async fn submit(&self, request: &CreateTaskRequest, mode: SubmitMode) -> RestClientResult<Submission> {
        match mode {
            SubmitMode::Async => self.create_task(request).await.map(Submission::Accepted),
            SubmitMode::Stream => self.create_task_stream(request).await.map(Submission::Streaming),
        }
    }

    /// Get the current state of a task
    pub async fn get_task(&self, task_id: &str) -> RestClientResult<Task> {
        let mut url = self.endpoint(TASKS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(task_id);
        self.execute(Method::GET, url, None::<&()>, None).await
    }

    /// List tasks, one page at a time
    pub async fn list_tasks(&self, query: &ListTasksQuery) -> RestClientResult<TaskList> {
        let mut url = self.endpoint(LIST_TASKS_PATH)?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.execute(Method::GET, url, None::<&()>, None).await
    }

    /// Send one request to `path` (relative to the base URL) and decode the
    /// JSON response.
    ///
    /// Caller headers replace the defaults of the same name.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> RestClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        self.execute(method, url, body, headers).await
    }

    // Private helper methods

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RestClientResult<T> {
        self.request(Method::POST, path, Some(body), None).await
    }

    /// Resolve `path` under the base URL, keeping any prefix the base carries
    fn endpoint(&self, path: &str) -> RestClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        extra_headers: Option<HeaderMap>,
    ) -> RestClientResult<RequestBuilder> {
        let mut headers = self.auth.headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut request = self.http_client.request(method, url).headers(headers);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(MonetClientError::Encode)?;
            request = request.body(payload);
        }
        Ok(request)
    }

    #[instrument(level = "debug", skip_all, fields(method = %method, path = %url.path()))]
    async fn execute<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        extra_headers: Option<HeaderMap>,
    ) -> RestClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, url, body, extra_headers)?;

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            debug!(%status, "received response");

            if !status.is_success() {
                return Err(Self::request_failed(response).await);
            }

            let bytes = response.bytes().await?;
            let value = serde_json::from_slice::<T>(&bytes).map_err(MonetClientError::Decode)?;
            Ok::<T, MonetClientError>(value)
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(self.timed_out()),
        }
    }

    fn timed_out(&self) -> MonetClientError {
        warn!(timeout_ms = self.timeout.as_millis() as u64, "request timed out");
        MonetClientError::Timeout(self.timeout)
    }

    /// Turn a non-success response into `RequestFailed`, using the service's
    /// error object when it sent one.
    async fn request_failed(response: Response) -> MonetClientError {
        let status = response.status();
        let body = response.text().await.ok();
        let error = body
            .as_deref()
            .and_then(|text| serde_json::from_str::<ErrorEnvelope>(text).ok())
            .and_then(|envelope| envelope.error)
            .unwrap_or_else(|| ApiError::unknown(status_text(status)));

        warn!(%status, code = %error.code, "request failed");
        MonetClientError::RequestFailed { status, error }
    }
}

fn status_text(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
