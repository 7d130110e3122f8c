use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::WizardConfig;
use crate::draft::TripRequestDraft;
use crate::errors::{SubmissionError, REJECTED_FALLBACK_MESSAGE};
use crate::wizard::{validate_step, WizardStep};

use super::payload::TripRequestPayload;
use super::transport::{BookingTransport, OutboundRequest, TransportResponse};

pub const DEFAULT_SUBMIT_PATH: &str = "/api/trip-requests";

const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Proof of an accepted trip request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub request_id: Uuid,
    /// Parsed response body, when the server sent JSON.
    pub body: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Turns a finished draft into one booking request and its response into
/// an outcome the wizard can show.
pub struct SubmissionAdapter<T: BookingTransport> {
    transport: T,
    config: Arc<WizardConfig>,
    path: String,
}

impl<T: BookingTransport> SubmissionAdapter<T> {
    pub fn new(transport: T, config: Arc<WizardConfig>) -> Self {
        Self {
            transport,
            config,
            path: DEFAULT_SUBMIT_PATH.to_string(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Validates the contact step again, then posts the draft once.
    pub fn submit(&self, draft: &TripRequestDraft) -> Result<SubmissionReceipt, SubmissionError> {
        let errors = validate_step(WizardStep::Contact, draft, &self.config.rules);
        if !errors.is_empty() {
            tracing::debug!(fields = errors.len(), "submission blocked by contact validation");
            return Err(SubmissionError::Validation(errors));
        }

        let payload = TripRequestPayload::from_draft(draft, &self.config);
        let request = OutboundRequest {
            path: self.path.clone(),
            request_id: Uuid::new_v4(),
            body: serde_json::to_value(&payload)?,
        };
        tracing::info!(
            request_id = %request.request_id,
            variant = self.config.variant.as_str(),
            "submitting trip request"
        );

        match self.transport.post_json(&request) {
            Ok(response) => interpret(response, request.request_id),
            Err(err) => {
                tracing::warn!(request_id = %request.request_id, error = %err, "trip request did not reach the server");
                Err(SubmissionError::Network(err.0))
            }
        }
    }
}

fn interpret(
    response: TransportResponse,
    request_id: Uuid,
) -> Result<SubmissionReceipt, SubmissionError> {
    if response.is_success() {
        tracing::info!(%request_id, status = response.status, "trip request accepted");
        return Ok(SubmissionReceipt {
            status: response.status,
            request_id,
            body: serde_json::from_str(&response.body).ok(),
        });
    }

    if response.status == STATUS_TOO_MANY_REQUESTS {
        tracing::warn!(%request_id, "trip request rate limited");
        return Err(SubmissionError::RateLimited);
    }

    let message =
        server_error_message(&response.body).unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string());
    tracing::warn!(%request_id, status = response.status, %message, "trip request rejected");
    Err(SubmissionError::Rejected {
        status: response.status,
        message,
    })
}

/// Extracts `{"error": "..."}` from a failure body, exactly as sent.
fn server_error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
