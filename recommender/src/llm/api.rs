use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use serde_json::Value;
use url::Url;

use crate::error::{RecommenderError, Result};
use crate::llm::provider::ModelTransport;

/// HTTP client for the model runtime `InvokeModel` endpoint:
/// `POST {base_url}/model/{model_id}/invoke`.
///
/// Makes exactly one request per call. Timeouts come from the configured
/// `reqwest::Client`.
#[derive(Clone)]
pub struct RuntimeApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RuntimeApiClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            RecommenderError::Config(format!("Invalid LLM endpoint '{base_url}': {e}"))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(RecommenderError::Config(format!(
                "LLM endpoint '{base_url}' cannot be used as a base URL"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                RecommenderError::Config(format!("Failed to create LLM HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    fn invoke_url(&self, model_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RecommenderError::Config("LLM endpoint cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["model", model_id, "invoke"]);
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(ref api_key) = self.api_key {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                    RecommenderError::Config(format!("Invalid LLM API key header: {e}"))
                })?,
            );
        }

        Ok(headers)
    }

    fn status_error(status: StatusCode, body: &str) -> RecommenderError {
        let body = body.trim();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RecommenderError::Transport(format!("LLM authentication failed ({status}): {body}"))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                RecommenderError::Transport(format!("LLM backend throttled the request: {body}"))
            }
            _ => RecommenderError::Transport(format!("LLM backend returned {status}: {body}")),
        }
    }
}

/// Text of an error response, or a note on why it could not be read.
fn body_or_read_error<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

#[async_trait]
impl ModelTransport for RuntimeApiClient {
    async fn invoke(&self, model_id: &str, body: &Value) -> Result<Value> {
        let url = self.invoke_url(model_id)?;
        tracing::debug!(%url, "Invoking model");

        let response = self
            .client
            .post(url)
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = body_or_read_error(response.text().await);
            return Err(Self::status_error(status, &text));
        }

        response.json::<Value>().await.map_err(|e| {
            RecommenderError::Transport(format!("Failed to decode LLM response body: {e}"))
        })
    }

    fn name(&self) -> &'static str {
        "runtime-api"
    }
}
