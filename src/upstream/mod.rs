use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderValue, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::errors::AppError;

/// What came back from a forwarded call, relayed to the browser as-is.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// HTTP client bound to one backend service. Cheap to clone; all clones share
/// the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    service: &'static str,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(service: &'static str, base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{path_and_query}", self.base_url)
    }

    /// Maps a transport failure to the error the browser sees.
    fn classify(&self, err: reqwest::Error) -> AppError {
        error!("{} request to {} failed: {err}", self.service, self.base_url);
        if err.is_timeout() {
            AppError::UpstreamTimeout { service: self.service, seconds: self.timeout.as_secs() }
        } else {
            AppError::UpstreamUnavailable { service: self.service, url: self.base_url.clone() }
        }
    }

    /// `POST` a JSON body and decode a JSON reply. Non-2xx answers are errors.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, request_id: &str) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.url(path))
            .header("X-Request-Id", request_id)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            error!("{} answered {status} for {path} (request {request_id})", self.service);
            return Err(AppError::UpstreamStatus { service: self.service, status: status.as_u16() });
        }

        let bytes = resp.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!("{} sent an undecodable body for {path}: {e}", self.service);
            AppError::UpstreamDecode { service: self.service, message: e.to_string() }
        })
    }

    /// Forwards a request verbatim and returns whatever the service answered,
    /// error statuses included.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        content_type: Option<HeaderValue>,
        body: Bytes,
    ) -> Result<UpstreamResponse, AppError> {
        debug!("Forwarding {method} {path_and_query} to {}", self.service);

        let mut request = self.http.request(method, self.url(path_and_query));
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let resp = request.send().await.map_err(|e| self.classify(e))?;
        let status = resp.status();
        let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;

        Ok(UpstreamResponse { status, content_type, body })
    }
}
