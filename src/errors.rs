use thiserror::Error;

use crate::draft::{CollectionField, DraftField};
use crate::wizard::ErrorMap;

/// Failures raised while loading configuration or building the HTTP client.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Rejected wizard operations. None of these change the wizard state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    #[error("`{0}` is not a selectable collection")]
    NotACollection(DraftField),
    #[error("`{0}` is a multi-select field; toggle its options instead")]
    NotAScalar(CollectionField),
    #[error("`{0}` is not offered by this wizard")]
    FieldDisabled(DraftField),
    #[error("`{value}` is not a valid {field} (options: {options})")]
    InvalidChoice {
        field: DraftField,
        value: String,
        options: String,
    },
    #[error("Invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("No submission is in progress")]
    NoSubmissionInFlight,
    #[error("This trip request has already been submitted")]
    AlreadySubmitted,
}

pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please try again later.";
pub const REJECTED_FALLBACK_MESSAGE: &str = "Failed to submit";
pub const NETWORK_FAILURE_MESSAGE: &str = "Failed to submit request";

/// Outcome of a submission that did not reach a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Contact details are incomplete")]
    Validation(ErrorMap),
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("{}: {0}", NETWORK_FAILURE_MESSAGE)]
    Network(String),
    #[error("Could not encode trip request: {0}")]
    Serialization(String),
}

impl SubmissionError {
    /// Text shown to the traveller. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(errors) => errors
                .iter()
                .next()
                .map(|(_, message)| message.clone())
                .unwrap_or_else(|| "Please review your contact details".to_string()),
            SubmissionError::RateLimited => RATE_LIMITED_MESSAGE.to_string(),
            SubmissionError::Rejected { message, .. } => message.clone(),
            SubmissionError::Network(_) | SubmissionError::Serialization(_) => {
                NETWORK_FAILURE_MESSAGE.to_string()
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self, SubmissionError::Validation(_))
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::Serialization(err.to_string())
    }
}
