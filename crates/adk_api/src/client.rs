use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;

use crate::config::AdkApiConfig;
use crate::error::{parse_error_message, AdkApiError};
use crate::headers::{build_headers, ACCEPT_EVENT_STREAM, ACCEPT_JSON};
use crate::payload::RunRequest;
use crate::sse::SseFrameAssembler;
use crate::url::{health_url, normalize_base_url, run_url, session_url};

/// Raw body chunks of a streaming run, in arrival order.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, AdkApiError>> + Send>>;

/// Session identity as returned by the session endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub app_name: String,
}

impl SessionRecord {
    /// Reject records missing any of the three identity fields.
    pub fn validate(self) -> Result<Self, AdkApiError> {
        if self.id.trim().is_empty() {
            return Err(AdkApiError::InvalidSession("id"));
        }
        if self.user_id.trim().is_empty() {
            return Err(AdkApiError::InvalidSession("userId"));
        }
        if self.app_name.trim().is_empty() {
            return Err(AdkApiError::InvalidSession("appName"));
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub struct AdkApiClient {
    http: Client,
    config: AdkApiConfig,
}

impl AdkApiClient {
    /// Fails with [`AdkApiError::InvalidBaseUrl`] unless the base URL is an
    /// absolute `http` or `https` URL.
    pub fn new(config: AdkApiConfig) -> Result<Self, AdkApiError> {
        validate_base_url(&config.base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AdkApiConfig {
        &self.config
    }

    pub fn build_headers(&self, accept: &str) -> Result<HeaderMap, AdkApiError> {
        let mut out = HeaderMap::new();
        for (key, value) in build_headers(&self.config, accept) {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| AdkApiError::InvalidHeader(format!("key: {key}")))?,
                HeaderValue::from_str(&value)
                    .map_err(|_| AdkApiError::InvalidHeader(format!("value for {key}")))?,
            );
        }
        Ok(out)
    }

    pub fn build_session_request(&self, session_id: &str) -> Result<RequestBuilder, AdkApiError> {
        let request = self
            .http
            .post(session_url(&self.config, session_id))
            .headers(self.build_headers(ACCEPT_JSON)?);
        Ok(self.with_request_timeout(request))
    }

    pub fn build_health_request(&self) -> Result<RequestBuilder, AdkApiError> {
        let request = self
            .http
            .get(health_url(&self.config))
            .headers(self.build_headers(ACCEPT_JSON)?);
        Ok(self.with_request_timeout(request))
    }

    /// Streaming runs carry no total timeout; only connecting is bounded.
    pub fn build_run_request(&self, request: &RunRequest) -> Result<RequestBuilder, AdkApiError> {
        Ok(self
            .http
            .post(run_url(&self.config))
            .headers(self.build_headers(ACCEPT_EVENT_STREAM)?)
            .json(request))
    }

    /// Create the session keyed by `session_id` for the configured caller.
    pub async fn create_session(&self, session_id: &str) -> Result<SessionRecord, AdkApiError> {
        let response = self.build_session_request(session_id)?.send().await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        let record: SessionRecord = serde_json::from_slice(&body)?;
        record.validate()
    }

    /// Probe liveness. Any received response below 500 counts as alive.
    pub async fn probe_health(&self) -> Result<StatusCode, AdkApiError> {
        let response = self.build_health_request()?.send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(AdkApiError::Status(
                status,
                status
                    .canonical_reason()
                    .unwrap_or("server error")
                    .to_string(),
            ));
        }
        Ok(status)
    }

    /// Dispatch one run and hand back its body as a chunk stream.
    pub async fn open_stream(&self, request: &RunRequest) -> Result<ChunkStream, AdkApiError> {
        let response = self.build_run_request(request)?.send().await?;
        let response = ensure_success(response).await?;
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|error| AdkApiError::Stream(error.to_string())));
        Ok(Box::pin(stream))
    }

    /// Dispatch one run and deliver each assembled frame payload in order.
    ///
    /// Returns the number of frames delivered.
    pub async fn stream_frames<F>(
        &self,
        request: &RunRequest,
        mut on_frame: F,
    ) -> Result<usize, AdkApiError>
    where
        F: FnMut(String),
    {
        let mut chunks = self.open_stream(request).await?;
        let mut assembler = SseFrameAssembler::default();
        let mut delivered = 0;

        while let Some(chunk) = chunks.next().await {
            for frame in assembler.feed(&chunk?) {
                delivered += 1;
                on_frame(frame);
            }
        }

        if let Some(frame) = assembler.finish() {
            delivered += 1;
            on_frame(frame);
        }

        Ok(delivered)
    }

    fn with_request_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }
}

fn validate_base_url(base_url: &str) -> Result<(), AdkApiError> {
    let parsed = Url::parse(&normalize_base_url(base_url))
        .map_err(|error| AdkApiError::InvalidBaseUrl(format!("{base_url}: {error}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AdkApiError::InvalidBaseUrl(format!(
            "{base_url}: unsupported scheme {scheme}"
        ))),
    }
}

async fn ensure_success(response: Response) -> Result<Response, AdkApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AdkApiError::Status(status, parse_error_message(status, &body)))
}
