// OpenAI-compatible adapter against a mock HTTP server

use mockito::Matcher;
use serde_json::json;

use draftloop::config::ProviderConfig;
use draftloop::providers::OpenAiCompletion;
use draftloop::{CompletionRequest, CompletionService, EngineError};

fn adapter(base_url: String) -> OpenAiCompletion {
    let config = ProviderConfig {
        api_key: Some("test-key".to_string()),
        base_url,
        model: "gpt-4o".to_string(),
        timeout_secs: 5,
        ..ProviderConfig::default()
    };
    OpenAiCompletion::from_config(&config).unwrap()
}

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_plain_completion() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "You write posts."},
                {"role": "user", "content": "Write one."}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("Monday lesson: say no more often."))
        .expect(1)
        .create_async()
        .await;

    let request = CompletionRequest::new("writer", "You write posts.", "Write one.");
    let text = adapter(server.url()).complete(&request).await.unwrap();

    assert_eq!(text, "Monday lesson: say no more often.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_structured_request_asks_for_json_object() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .with_status(200)
        .with_body(completion_body(r#"{"overall_score": 88}"#))
        .create_async()
        .await;

    let request = CompletionRequest::new("critic", "s", "u")
        .structured()
        .with_model("gpt-4o-mini")
        .with_temperature(0.3);
    let text = adapter(server.url()).complete(&request).await.unwrap();

    assert_eq!(text, r#"{"overall_score": 88}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(400)
        .with_body(r#"{"error": {"message": "bad model"}}"#)
        .expect(1)
        .create_async()
        .await;

    let request = CompletionRequest::new("writer", "s", "u");
    let err = adapter(server.url()).complete(&request).await.unwrap_err();

    assert!(format!("{:#}", err).contains("400"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_null_content_is_empty_completion_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let request = CompletionRequest::new("critic", "s", "u");
    let err = adapter(server.url()).complete(&request).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::EmptyCompletion { caller }) if caller == "critic"
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_choices_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let request = CompletionRequest::new("writer", "s", "u");
    let err = adapter(server.url()).complete(&request).await.unwrap_err();
    assert!(format!("{:#}", err).contains("no choices"));
}
