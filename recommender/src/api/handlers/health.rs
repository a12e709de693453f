use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub llm: LlmStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LlmStatus {
    /// `ready` when a model id is configured, `unconfigured` otherwise.
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `GET /{env}/health`
#[utoipa::path(
    get,
    path = "/{env}/health",
    tag = "health",
    params(("env" = String, Path, description = "Deployment name, e.g. `dev`")),
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let llm_status = LlmStatus {
        status: if state.recommender.is_some() {
            "ready"
        } else {
            "unconfigured"
        }
        .to_string(),
        backend: state.llm.backend().kind().to_string(),
        model: state.llm.model_id().map(str::to_string),
    };

    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.server.env.clone(),
        llm: llm_status,
    })
}
