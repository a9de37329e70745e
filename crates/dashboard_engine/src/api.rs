use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use dashboard_core::JobStatus;

/// Deployed API Gateway stage used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://baau72q1kd.execute-api.us-east-1.amazonaws.com/Prod";

/// Environment variable that overrides [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "DASHBOARD_API_BASE";

/// Where and how to reach the job API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    /// Default settings, with the base URL taken from `DASHBOARD_API_BASE`
    /// when that variable is set and non-empty.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            let trimmed = base.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                settings.base_url = trimmed.to_string();
            }
        }
        settings
    }
}

/// Response of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateJobResponse {
    pub job_id: String,
    pub status: JobStatus,
}

/// Response of `GET /jobs/{job_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    /// Raw result payload: a JSON object, or a JSON-encoded string.
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Errors raised by the job API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered outside the 2xx range.
    #[error("{operation} failed: {status} {reason} {body}")]
    Status {
        operation: &'static str,
        status: u16,
        reason: String,
        body: String,
    },
    /// The request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not the expected JSON.
    #[error("unreadable response: {0}")]
    Decode(String),
    /// The run's cancellation token fired before the call completed.
    #[error("cancelled")]
    Cancelled,
}

/// Seam over the two job endpoints, so the orchestrator can be exercised
/// without a live backend.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Submit a new analysis job.
    async fn create_job(&self, cancel: &CancellationToken)
        -> Result<CreateJobResponse, ApiError>;

    /// Fetch the current status of `job_id`.
    async fn job_status(
        &self,
        job_id: &str,
        cancel: &CancellationToken,
    ) -> Result<JobStatusResponse, ApiError>;
}

/// Both queries are always requested; the backend skips anything not
/// flagged `"true"`.
fn job_params() -> Value {
    json!({ "params": { "sql_1": "true", "sql_2": "true" } })
}

/// reqwest-backed [`JobApi`] implementation.
#[derive(Debug, Clone)]
pub struct HttpJobApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl HttpJobApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Send `request`, honoring `cancel` at every await point, and decode a
    /// JSON body on success.
    async fn execute<T>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            sent = request.send() => sent.map_err(|err| ApiError::Network(err.to_string()))?,
        };

        let status = response.status();
        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            text = response.text() => text.unwrap_or_default(),
        };

        if !status.is_success() {
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl JobApi for HttpJobApi {
    async fn create_job(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CreateJobResponse, ApiError> {
        let request = self.client.post(self.url("/jobs")).json(&job_params());
        self.execute("create job", request, cancel).await
    }

    async fn job_status(
        &self,
        job_id: &str,
        cancel: &CancellationToken,
    ) -> Result<JobStatusResponse, ApiError> {
        let request = self.client.get(self.url(&format!("/jobs/{job_id}")));
        self.execute("get status", request, cancel).await
    }
}
