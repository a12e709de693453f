//! Objective recommendation: prompt the model, then recover a
//! [`RecommendResponse`] from whatever text it sends back.

mod extract;
mod parse;

pub use extract::{extract_text, FALLBACK_TEXT_KEYS};
pub use parse::parse_json_object;

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::Instrument;
use validator::Validate;

use crate::error::{RecommenderError, Result};
use crate::llm::{prompts, ModelTransport};
use crate::models::{ObjectiveRequest, RecommendResponse};

/// Check a recovered mapping against the three-key response contract.
pub fn validate_output(map: Map<String, Value>) -> Result<RecommendResponse> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| RecommenderError::OutputShape(e.to_string()))
}

/// Runs one recommendation per call against an injected transport.
///
/// Holds no per-request state, so a single instance is shared by all
/// in-flight requests.
#[derive(Clone)]
pub struct Recommender {
    transport: Arc<dyn ModelTransport>,
    model_id: String,
}

impl Recommender {
    pub fn new(transport: Arc<dyn ModelTransport>, model_id: impl Into<String>) -> Self {
        Self {
            transport,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Validate an untyped payload, then recommend.
    pub async fn recommend_value(&self, payload: Value) -> Result<RecommendResponse> {
        let request = ObjectiveRequest::from_value(payload)?;
        self.recommend(&request).await
    }

    pub async fn recommend(&self, request: &ObjectiveRequest) -> Result<RecommendResponse> {
        request.validate()?;

        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            "recommend",
            %request_id,
            model_id = %self.model_id,
            transport = self.transport.name()
        );

        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &ObjectiveRequest) -> Result<RecommendResponse> {
        let body = prompts::recommendation_body(request)?;

        let raw = self
            .transport
            .invoke(&self.model_id, &body)
            .await
            .map_err(|error| match error {
                RecommenderError::Transport(_) => error,
                other => RecommenderError::Transport(other.to_string()),
            })?;

        let text = extract_text(&raw);
        if text.is_empty() {
            tracing::warn!("Model response contained no text");
            return Err(RecommenderError::EmptyResponse);
        }
        tracing::debug!(response_len = text.len(), "Model text extracted");

        let parsed = match parse_json_object(&text) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!(
                    response_len = text.len(),
                    response_preview = %text.chars().take(100).collect::<String>(),
                    %error,
                    "Failed to parse model output"
                );
                return Err(error);
            }
        };

        let response = validate_output(parsed)?;
        tracing::info!("Recommendation produced");
        Ok(response)
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("transport", &self.transport.name())
            .field("model_id", &self.model_id)
            .finish()
    }
}
