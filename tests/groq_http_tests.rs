// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Groq backend against a local HTTP mock.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use groqberry::chat::{ChatSessionBuilder, GenerationMode};
use groqberry::config::Settings;
use groqberry::error::{ApiError, GroqberryError};
use groqberry::llm::provider::{
    CompletionRequest, Credential, GenerationClient, ModelLister, StopReason,
};
use groqberry::llm::providers::GroqProvider;
use groqberry::models::ModelCatalog;

fn credential() -> Credential {
    Credential::new("gsk-test").unwrap()
}

fn provider_for(server: &MockServer) -> GroqProvider {
    GroqProvider::with_base_url(format!("{}/openai/v1", server.uri()))
}

fn completion_body(text: &str, finish_reason: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "llama3-8b-8192",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": finish_reason
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13}
    })
}

#[tokio::test]
async fn test_complete_sends_deterministic_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(json!({
            "model": "llama3-8b-8192",
            "messages": [{"role": "user", "content": "2+2?"}],
            "temperature": 0.0,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("4", "stop")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let response = provider
        .complete(&credential(), CompletionRequest::new("llama3-8b-8192", "2+2?"))
        .await
        .unwrap();

    assert_eq!(response.text, "4");
    assert_eq!(response.id, "chatcmpl-123");
    assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    assert_eq!(response.usage.input_tokens, 12);
    assert_eq!(response.usage.output_tokens, 1);

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("max_tokens").is_none());
}

#[tokio::test]
async fn test_complete_with_token_ceiling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(body_partial_json(json!({"max_tokens": 4096})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("long answer", "length")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let response = provider
        .complete(
            &credential(),
            CompletionRequest::new("llama3-8b-8192", "think").with_max_tokens(4096),
        )
        .await
        .unwrap();

    assert_eq!(response.stop_reason, Some(StopReason::MaxTokens));
}

#[tokio::test]
async fn test_complete_invalid_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .complete(&credential(), CompletionRequest::new("m", "p"))
        .await;

    assert!(matches!(
        result,
        Err(GroqberryError::Provider(ApiError::AuthenticationFailed))
    ));
}

#[tokio::test]
async fn test_complete_rate_limited_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_json(json!({
                    "error": {"message": "Rate limit reached", "code": "rate_limit_exceeded"}
                })),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .complete(&credential(), CompletionRequest::new("m", "p"))
        .await;

    match result {
        Err(GroqberryError::Provider(ApiError::RateLimited(secs))) => assert_eq!(secs, 7),
        other => panic!("Expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_complete_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .complete(&credential(), CompletionRequest::new("m", "p"))
        .await;

    assert!(matches!(
        result,
        Err(GroqberryError::Provider(ApiError::InvalidResponse(_)))
    ));
}

#[tokio::test]
async fn test_complete_connection_refused() {
    let provider = GroqProvider::with_base_url("http://127.0.0.1:1/openai/v1");
    let result = provider
        .complete(&credential(), CompletionRequest::new("m", "p"))
        .await;

    assert!(matches!(
        result,
        Err(GroqberryError::Provider(ApiError::Network(_)))
    ));
}

#[tokio::test]
async fn test_list_models_in_server_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openai/v1/models"))
        .and(header("authorization", "Bearer gsk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "llama3-70b-8192", "object": "model", "owned_by": "Meta"},
                {"id": "mixtral-8x7b-32768", "object": "model", "owned_by": "Mistral AI"},
                {"id": "gemma-7b-it", "object": "model", "owned_by": "Google"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let models = provider.list_models(&credential()).await.unwrap();

    assert_eq!(
        models,
        vec!["llama3-70b-8192", "mixtral-8x7b-32768", "gemma-7b-it"]
    );
}

#[tokio::test]
async fn test_list_models_failure_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openai/v1/models"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider.list_models(&credential()).await;

    match result {
        Err(GroqberryError::Network(message)) => assert!(message.contains("upstream down")),
        other => panic!("Expected Network, got {:?}", other),
    }
}

#[tokio::test]
async fn test_catalog_refresh_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openai/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "llama3-70b-8192"}, {"id": "gemma-7b-it"}]
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let mut catalog = ModelCatalog::new("llama3-8b-8192", Some("retired-model".to_string()));
    catalog.refresh(&provider, Some(&credential())).await.unwrap();

    assert_eq!(catalog.selected(), "llama3-70b-8192");
    assert!(catalog.contains("gemma-7b-it"));
}

#[tokio::test]
async fn test_session_plain_turn_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("4", "stop")))
        .mount(&mock_server)
        .await;

    let provider = Arc::new(provider_for(&mock_server));
    let mut session = ChatSessionBuilder::new(Settings::default())
        .with_generation_client(provider.clone())
        .with_model_lister(provider.clone())
        .with_agent_runner(Arc::new(groqberry::agents::ResearchAgent::new(provider)))
        .with_api_key(Some("gsk-test".to_string()))
        .build()
        .unwrap();

    let answer = session
        .submit("2+2?", GenerationMode::Plain, "")
        .await
        .unwrap();

    assert_eq!(answer, "4");
    assert_eq!(session.log().len(), 2);
}
