//! Wire access for the booking endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::PlannerError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A single JSON POST the adapter wants sent.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub path: String,
    pub request_id: Uuid,
    pub body: serde_json::Value,
}

/// Status and raw body of whatever the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response was obtained (connection refused, timeout, broken body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends booking requests. Implementations issue exactly one request per
/// call and never retry.
pub trait BookingTransport {
    fn post_json(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError>;
}

impl<T: BookingTransport + ?Sized> BookingTransport for &T {
    fn post_json(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        (**self).post_json(request)
    }
}

impl<T: BookingTransport + ?Sized> BookingTransport for Box<T> {
    fn post_json(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        (**self).post_json(request)
    }
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PlannerError::HttpClient(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PlannerError> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl BookingTransport for HttpTransport {
    fn post_json(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(&request.path);
        tracing::debug!(%url, request_id = %request.request_id, "posting trip request");

        let response = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, request.request_id.to_string())
            .json(&request.body)
            .send()
            .map_err(|err| TransportError(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(TransportResponse { status, body })
    }
}
