use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{LlmConfig, ServerConfig};
use crate::error::{RecommenderError, Result};
use crate::llm::api::RuntimeApiClient;
use crate::llm::mock::MockTransport;

/// The single capability the recommendation core needs from an LLM host.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Send an opaque request body to `model_id` and return the opaque
    /// response body. Any failure is reported as a transport error.
    async fn invoke(&self, model_id: &str, body: &Value) -> Result<Value>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    /// In-process canned answers.
    Mock,
    /// Unauthenticated runtime emulator at an endpoint override.
    Local { endpoint: String },
    /// Managed cloud runtime.
    Managed { base_url: String },
}

impl LlmBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Local { .. } => "local",
            Self::Managed { .. } => "managed",
        }
    }
}

/// Transport chosen once at startup from configuration.
#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    transport: Arc<dyn ModelTransport>,
    model_id: Option<String>,
}

impl LlmProvider {
    /// - `local` without an endpoint override: [`MockTransport`]
    /// - `local` with an override: unauthenticated [`RuntimeApiClient`]
    /// - anything else: managed [`RuntimeApiClient`], which needs an API key
    pub fn from_config(server: &ServerConfig, config: &LlmConfig) -> Result<Self> {
        let (backend, transport): (LlmBackend, Arc<dyn ModelTransport>) = if server.is_local() {
            match &config.endpoint {
                None => (LlmBackend::Mock, Arc::new(MockTransport::new())),
                Some(_) => {
                    let client =
                        RuntimeApiClient::new(&config.runtime_base_url(), None, config.timeout_secs)?;
                    (
                        LlmBackend::Local {
                            endpoint: client.base_url().to_string(),
                        },
                        Arc::new(client),
                    )
                }
            }
        } else {
            let api_key = config.api_key.clone().ok_or_else(|| {
                RecommenderError::Config(format!(
                    "LLM_API_KEY is required for the managed LLM backend (env={})",
                    server.env
                ))
            })?;
            let client = RuntimeApiClient::new(
                &config.runtime_base_url(),
                Some(api_key),
                config.timeout_secs,
            )?;
            (
                LlmBackend::Managed {
                    base_url: client.base_url().to_string(),
                },
                Arc::new(client),
            )
        };

        Ok(Self {
            backend,
            transport,
            model_id: config.model_id.clone(),
        })
    }

    /// Wrap an arbitrary transport, e.g. a test double.
    pub fn with_transport(
        backend: LlmBackend,
        transport: Arc<dyn ModelTransport>,
        model_id: Option<String>,
    ) -> Self {
        Self {
            backend,
            transport,
            model_id,
        }
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn transport(&self) -> Arc<dyn ModelTransport> {
        Arc::clone(&self.transport)
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }
}

impl std::fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("backend", &self.backend)
            .field("transport", &self.transport.name())
            .field("model_id", &self.model_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(env: &str) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            env: env.to_string(),
            api_key: Some("k".to_string()),
            max_body_bytes: 1024,
        }
    }

    #[test]
    fn test_local_without_endpoint_uses_mock() {
        let provider = LlmProvider::from_config(&server("local"), &LlmConfig::default()).unwrap();
        assert_eq!(provider.backend(), &LlmBackend::Mock);
        assert_eq!(provider.transport().name(), "mock");
    }

    #[test]
    fn test_local_with_endpoint_uses_unauthenticated_client() {
        let config = LlmConfig {
            endpoint: Some("http://localhost:4566".to_string()),
            ..LlmConfig::default()
        };
        let provider = LlmProvider::from_config(&server("local"), &config).unwrap();
        assert_eq!(
            provider.backend(),
            &LlmBackend::Local {
                endpoint: "http://localhost:4566".to_string()
            }
        );
    }

    #[test]
    fn test_managed_requires_api_key() {
        let result = LlmProvider::from_config(&server("dev"), &LlmConfig::default());
        assert!(matches!(result, Err(RecommenderError::Config(_))));
    }

    #[test]
    fn test_managed_uses_region_endpoint() {
        let config = LlmConfig {
            api_key: Some("secret".to_string()),
            model_id: Some("anthropic.claude-3-haiku".to_string()),
            region: "us-west-2".to_string(),
            ..LlmConfig::default()
        };
        let provider = LlmProvider::from_config(&server("prod"), &config).unwrap();
        assert_eq!(provider.backend().kind(), "managed");
        assert_eq!(
            provider.backend(),
            &LlmBackend::Managed {
                base_url: "https://bedrock-runtime.us-west-2.amazonaws.com".to_string()
            }
        );
        assert_eq!(provider.model_id(), Some("anthropic.claude-3-haiku"));
    }
}
