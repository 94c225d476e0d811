//! Error types for the analysis pipeline

use shared_types::ModelError;
use thiserror::Error;

/// Everything that can go wrong between sending the prompt and holding a
/// validated `AnalysisResult`. None of these are retried.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Request to completion endpoint failed: {0}")]
    Request(String),

    #[error("Completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion endpoint returned no message content")]
    EmptyReply,

    #[error("Model reply is not valid analysis JSON: {0}")]
    MalformedReply(String),

    #[error("Model reply failed validation: {0}")]
    InvalidReply(#[from] ModelError),

    #[error("Client configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// True when the endpoint answered but the content was unusable
    pub fn is_malformed_reply(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyReply
                | AnalysisError::MalformedReply(_)
                | AnalysisError::InvalidReply(_)
        )
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Request(format!("timed out: {}", err))
        } else {
            AnalysisError::Request(err.to_string())
        }
    }
}
