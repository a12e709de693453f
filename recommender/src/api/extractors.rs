//! JSON body extraction for the recommendation route.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::RecommenderError;

/// `axum::Json` whose rejections are answered with the service's error
/// envelope instead of axum's plain-text bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(RecommenderError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for RecommenderError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();

        match &rejection {
            JsonRejection::JsonDataError(_) => match missing_field(&detail) {
                Some(field) => Self::Validation(format!("Missing required field: {field}")),
                None => Self::Validation(format!("Invalid request body: {}", serde_detail(&detail))),
            },
            JsonRejection::JsonSyntaxError(_) => {
                Self::Validation(format!("Malformed JSON: {}", serde_detail(&detail)))
            }
            JsonRejection::MissingJsonContentType(_) => {
                Self::Validation("Expected `Content-Type: application/json`".to_string())
            }
            // Bodies without a Content-Length header only hit the size limit
            // while being buffered here.
            JsonRejection::BytesRejection(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Self::PayloadTooLarge("Request body exceeds the configured size limit".to_string())
            }
            JsonRejection::BytesRejection(_) => {
                Self::Internal(format!("Failed to read request body: {detail}"))
            }
            _ => Self::Validation(detail),
        }
    }
}

/// axum prefixes serde's message with its own summary; keep serde's part.
fn serde_detail(text: &str) -> &str {
    text.split_once(": ").map_or(text, |(_, detail)| detail)
}

fn missing_field(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}
