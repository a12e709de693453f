use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;
use crate::llm::provider::ModelTransport;

/// In-process stand-in for the model runtime, used for `APP_ENV=local`
/// when no endpoint override is configured.
///
/// Answers every invocation with a deterministic Anthropic-shaped payload
/// built from the objective found in the user turn.
#[derive(Debug, Clone, Default)]
pub struct MockTransport;

impl MockTransport {
    pub fn new() -> Self {
        Self
    }

    fn objective_from_body(body: &Value) -> Option<String> {
        let text = body
            .pointer("/messages/0/content/0/text")
            .and_then(Value::as_str)?;
        let payload: Value = serde_json::from_str(text).ok()?;
        payload
            .get("objective")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[async_trait]
impl ModelTransport for MockTransport {
    async fn invoke(&self, model_id: &str, body: &Value) -> Result<Value> {
        let objective =
            Self::objective_from_body(body).unwrap_or_else(|| "the objective".to_string());
        tracing::debug!(model_id, "Mock transport answering locally");

        let answer = json!({
            "reason": format!("Mock response from local mode for model {model_id}."),
            "suggestedDefiningObjective": format!(
                "{objective}, measured by a concrete, testable success criterion."
            ),
            "alternativeDefiningObjective": format!(
                "{objective}, verified against an agreed acceptance check."
            ),
        });

        Ok(json!({
            "id": "msg_local_mock",
            "type": "message",
            "role": "assistant",
            "model": model_id,
            "content": [
                { "type": "text", "text": answer.to_string() }
            ],
            "stop_reason": "end_turn"
        }))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
