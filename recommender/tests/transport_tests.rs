mod common;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use recommender::config::{LlmConfig, ServerConfig};
use recommender::error::RecommenderError;
use recommender::llm::{prompts, LlmBackend, LlmProvider, ModelTransport, RuntimeApiClient};
use recommender::models::ObjectiveRequest;
use recommender::recommendation::Recommender;

use common::VALID_ANSWER;

fn server_config(env: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
        env: env.to_string(),
        api_key: Some("inbound".to_string()),
        max_body_bytes: 1024,
    }
}

fn anthropic_body(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
}

#[tokio::test]
async fn test_invoke_posts_to_model_path_with_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/model/test-model/invoke"))
        .and(header("authorization", "Bearer runtime-key"))
        .and(body_partial_json(json!({
            "anthropic_version": prompts::ANTHROPIC_VERSION,
            "max_tokens": 512
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body("hi")))
        .expect(1)
        .mount(&server)
        .await;

    let client = RuntimeApiClient::new(&server.uri(), Some("runtime-key".to_string()), 5).unwrap();
    let body = prompts::recommendation_body(&ObjectiveRequest::new("x")).unwrap();

    let response = client.invoke("test-model", &body).await.unwrap();
    assert_eq!(response["content"][0]["text"], "hi");
}

#[tokio::test]
async fn test_server_error_is_transport_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/model/test-model/invoke"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .expect(1)
        .mount(&server)
        .await;

    let client = RuntimeApiClient::new(&server.uri(), None, 5).unwrap();
    let result = client.invoke("test-model", &json!({})).await;

    match result {
        Err(RecommenderError::Transport(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("internal failure"));
        }
        other => panic!("Expected Transport error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_failure_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/model/test-model/invoke"))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .mount(&server)
        .await;

    let client = RuntimeApiClient::new(&server.uri(), Some("bad".to_string()), 5).unwrap();
    let result = client.invoke("test-model", &json!({})).await;

    match result {
        Err(RecommenderError::Transport(message)) => {
            assert!(message.to_lowercase().contains("authentication failed"));
        }
        other => panic!("Expected Transport error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/model/test-model/invoke"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = RuntimeApiClient::new(&server.uri(), None, 5).unwrap();
    let result = client.invoke("test-model", &json!({})).await;

    assert!(matches!(result, Err(RecommenderError::Transport(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client = RuntimeApiClient::new("http://127.0.0.1:9", None, 2).unwrap();
    let result = client.invoke("test-model", &json!({})).await;

    assert!(matches!(result, Err(RecommenderError::Transport(_))));
}

#[tokio::test]
async fn test_local_endpoint_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/model/local-model/invoke"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(anthropic_body(&format!(
                "```json\n{VALID_ANSWER}\n```"
            ))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = LlmConfig {
        model_id: Some("local-model".to_string()),
        endpoint: Some(server.uri()),
        ..LlmConfig::default()
    };
    let provider = LlmProvider::from_config(&server_config("local"), &config).unwrap();
    assert!(matches!(provider.backend(), LlmBackend::Local { .. }));

    let recommender = Recommender::new(provider.transport(), "local-model");
    let result = recommender
        .recommend(&ObjectiveRequest::new("make the button better"))
        .await
        .unwrap();

    assert_eq!(result.suggested_defining_objective, "s");
}

#[tokio::test]
async fn test_mock_backend_end_to_end() {
    let provider =
        LlmProvider::from_config(&server_config("local"), &LlmConfig::default()).unwrap();
    let recommender = Recommender::new(provider.transport(), "any-model");

    let result = recommender
        .recommend(&ObjectiveRequest::new("reduce onboarding time"))
        .await
        .unwrap();

    assert!(result
        .suggested_defining_objective
        .starts_with("reduce onboarding time"));
}
