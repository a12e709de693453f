#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use recommender::config::{Config, LlmConfig, LogFormat, LoggingConfig, ServerConfig};
use recommender::error::{RecommenderError, Result};
use recommender::llm::ModelTransport;

/// Transport double that returns a fixed payload and counts invocations.
pub struct StubTransport {
    reply: Value,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl StubTransport {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply,
            fail_with: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Value::Null,
            fail_with: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelTransport for StubTransport {
    async fn invoke(&self, _model_id: &str, _body: &Value) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(RecommenderError::Transport(message.clone())),
            None => Ok(self.reply.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Anthropic-style response with a single text block.
pub fn text_reply(text: &str) -> Value {
    json!({"content": [{"type": "text", "text": text}]})
}

pub const VALID_ANSWER: &str =
    r#"{"reason":"r","suggestedDefiningObjective":"s","alternativeDefiningObjective":"a"}"#;

pub fn test_config(api_key: Option<&str>, model_id: Option<&str>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            env: "test".to_string(),
            api_key: api_key.map(str::to_string),
            max_body_bytes: 64 * 1024,
        },
        llm: LlmConfig {
            model_id: model_id.map(str::to_string),
            ..LlmConfig::default()
        },
        logging: LoggingConfig {
            format: LogFormat::Pretty,
        },
    }
}
