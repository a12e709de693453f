use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use super::middleware::API_KEY_HEADER;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Objective Recommendation API",
        version = "1.0.0",
        description = "Turns a vague objective into a clearer, testable defining objective.",
    ),
    paths(
        handlers::health::health_check,
        handlers::recommendation::recommend,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        response::ApiErrorBody,
        models::ObjectiveRequest,
        models::ObjectiveContext,
        models::RecommendResponse,
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "recommendation", description = "Defining objective recommendations (API key required)"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
