//! # Error envelope
//!
//! Successful calls return their payload as the bare JSON body. Every
//! error response uses one envelope:
//!
//! ```json
//! { "error": { "code": "upstream_failure", "message": "..." } }
//! ```
//!
//! Caller mistakes (`invalid_request`, `unauthorized`) are kept distinct
//! from failures of the LLM backend (`upstream_failure`).

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request body was malformed or failed validation. HTTP 400.
    InvalidRequest,
    /// The `X-API-Key` header is missing or wrong. HTTP 401.
    Unauthorized,
    /// The request body exceeded the configured limit. HTTP 413.
    PayloadTooLarge,
    /// Server misconfiguration or an unexpected fault. HTTP 500.
    InternalError,
    /// The LLM backend failed or its answer was unusable. HTTP 502.
    UpstreamFailure,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamFailure => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::PayloadTooLarge => write!(f, "payload_too_large"),
            Self::InternalError => write!(f, "internal_error"),
            Self::UpstreamFailure => write!(f, "upstream_failure"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Human-readable description. Upstream failures carry the backend's
    /// message for diagnostics.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

impl ApiErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ApiError {
                code,
                message: message.into(),
            },
        }
    }
}
