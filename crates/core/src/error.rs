use reqwest::StatusCode;
use thiserror::Error;

pub const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Configuration(String),
    #[error("webhook responded {status}. {body}")]
    Upstream { status: u16, body: String },
    #[error("{0}")]
    Internal(String),
}

impl SubmissionError {
    pub fn invalid_month() -> Self {
        SubmissionError::InvalidInput("invalid month".to_string())
    }

    pub fn invalid_year() -> Self {
        SubmissionError::InvalidInput("invalid year".to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            SubmissionError::Internal(UNKNOWN_ERROR.to_string())
        } else {
            SubmissionError::Internal(message)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SubmissionError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SubmissionError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            SubmissionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::internal(err.to_string())
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::internal(err.to_string())
    }
}
