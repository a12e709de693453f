//! Objective recommendation handler.

use axum::{extract::State, Json};

use crate::api::response::ApiErrorBody;
use crate::api::{AppJson, AppState};
use crate::error::{RecommenderError, Result};
use crate::models::{ObjectiveRequest, RecommendResponse};

/// `POST /{env}/recommendation`
///
/// Takes a vague objective and optional context and returns a clearer,
/// testable defining objective.
#[utoipa::path(
    post,
    path = "/{env}/recommendation",
    tag = "recommendation",
    params(("env" = String, Path, description = "Deployment name, e.g. `dev`")),
    request_body = ObjectiveRequest,
    responses(
        (status = 200, description = "Recommended defining objectives", body = RecommendResponse),
        (status = 400, description = "Invalid request", body = ApiErrorBody),
        (status = 401, description = "Invalid or missing API key", body = ApiErrorBody),
        (status = 413, description = "Request body too large", body = ApiErrorBody),
        (status = 500, description = "Server misconfigured", body = ApiErrorBody),
        (status = 502, description = "LLM backend failed or answered unusably", body = ApiErrorBody),
    ),
    security(("api_key" = []))
)]
pub async fn recommend(
    State(state): State<AppState>,
    AppJson(req): AppJson<ObjectiveRequest>,
) -> Result<Json<RecommendResponse>> {
    let recommender = state.recommender.as_ref().ok_or_else(|| {
        RecommenderError::Config("BEDROCK_MODEL_ID is not configured".to_string())
    })?;

    let response = recommender.recommend(&req).await?;
    Ok(Json(response))
}
