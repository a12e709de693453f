use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::{ApiErrorBody, ErrorCode};

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Model response did not contain any text")]
    EmptyResponse,

    #[error("Could not parse model output as JSON: {0}")]
    Parse(String),

    #[error("Model output has the wrong shape: {0}")]
    OutputShape(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl RecommenderError {
    /// True for failures caused by the LLM backend or its output rather
    /// than by the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::EmptyResponse | Self::Parse(_) | Self::OutputShape(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::InvalidRequest,
            Self::Unauthorized(_) => ErrorCode::Unauthorized,
            Self::PayloadTooLarge(_) => ErrorCode::PayloadTooLarge,
            Self::Config(_) | Self::Internal(_) => ErrorCode::InternalError,
            Self::Transport(_) | Self::EmptyResponse | Self::Parse(_) | Self::OutputShape(_) => {
                ErrorCode::UpstreamFailure
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Config(msg) => msg.clone(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            upstream => upstream.to_string(),
        }
    }
}

impl From<reqwest::Error> for RecommenderError {
    fn from(err: reqwest::Error) -> Self {
        RecommenderError::Transport(format!("LLM request failed: {err}"))
    }
}

impl From<validator::ValidationErrors> for RecommenderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RecommenderError::Validation(crate::models::describe_validation_errors(&errors))
    }
}

impl IntoResponse for RecommenderError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status: StatusCode = code.status();

        if self.is_upstream() {
            tracing::warn!(error = %self, "Upstream failure");
        } else if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ApiErrorBody::new(code, self.public_message());
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RecommenderError>;
