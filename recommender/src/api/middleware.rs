//! # API Key Authentication Middleware
//!
//! Protects the recommendation route with a shared key sent in the
//! `X-API-Key` header and compared against the `API_KEY` configuration.
//! Health and documentation routes are mounted outside this layer.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::error::RecommenderError;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// # Behavior
///
/// - `API_KEY` unset → 500 `internal_error`. The server starts, but the
///   protected route refuses every request.
/// - Header missing or not equal to the configured key → 401 `unauthorized`.
/// - Otherwise the request passes through.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.config.server.api_key.as_deref() else {
        return RecommenderError::Config("API_KEY is not configured".to_string()).into_response();
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(key) if key == expected => next.run(request).await,
        _ => RecommenderError::Unauthorized("Invalid or missing API key".to_string())
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LlmConfig, LogFormat, LoggingConfig, ServerConfig};
    use crate::llm::{LlmBackend, LlmProvider, MockTransport};
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_test_app(api_key: Option<&str>) -> Router {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                env: "test".to_string(),
                api_key: api_key.map(str::to_string),
                max_body_bytes: 1024,
            },
            llm: LlmConfig::default(),
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        };
        let llm = LlmProvider::with_transport(LlmBackend::Mock, Arc::new(MockTransport::new()), None);
        let state = AppState::new(config, llm);

        async fn protected_handler() -> &'static str {
            "protected"
        }

        Router::new()
            .route("/protected", get(protected_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                api_key_middleware,
            ))
            .with_state(state)
    }

    async fn parse_error_body(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    fn request(key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/protected");
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_allows_matching_key() {
        let app = build_test_app(Some("secret"));
        let response = app.oneshot(request(Some("secret"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_wrong_key() {
        let app = build_test_app(Some("secret"));
        let response = app.oneshot(request(Some("guess"))).await.unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
        assert_eq!(json["error"]["message"], "Invalid or missing API key");
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let app = build_test_app(Some("secret"));
        let response = app.oneshot(request(None)).await.unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn test_unconfigured_key_is_server_error() {
        let app = build_test_app(None);
        let response = app.oneshot(request(Some("anything"))).await.unwrap();

        let (status, json) = parse_error_body(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "API_KEY is not configured");
    }
}
