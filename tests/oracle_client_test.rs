//! HTTP contract tests for the translation oracle client
//!
//! These tests pin the request shape the client sends to an OpenAI-compatible
//! chat-completions endpoint, using a local mock server.

use kartoteka::adapters::oracle::{HttpOracleClient, TranslationOracle, TranslationRequest};
use kartoteka::config::{secret_string, OracleConfig};
use kartoteka::domain::OracleError;
use mockito::Matcher;
use serde_json::json;

fn oracle_config(endpoint_url: String) -> OracleConfig {
    OracleConfig {
        endpoint_url,
        api_key: secret_string("sk-contract-test".to_string()),
        model: "gpt-4o-mini".to_string(),
        timeout_seconds: 5,
        tls_verify: true,
    }
}

fn request() -> TranslationRequest {
    TranslationRequest {
        text: "Surgeon".to_string(),
        source_locale: "en".to_string(),
        target_locales: vec!["sr-Latn".to_string(), "ru".to_string()],
        context: "You are translating job titles.".to_string(),
    }
}

#[tokio::test]
async fn test_request_carries_model_format_and_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-contract-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#,
        )
        .create_async()
        .await;

    let client =
        HttpOracleClient::new(oracle_config(format!("{}/v1/chat/completions", server.url())))
            .unwrap();
    client.translate(&request()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_prompt_names_locales_and_carries_source_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Translate from \\\\\"en\\\\\" into \\\\\"sr-Latn, ru\\\\\"".to_string()),
            Matcher::Regex("Text: \\\\\"Surgeon\\\\\"".to_string()),
            Matcher::Regex("You are translating job titles\\.".to_string()),
            Matcher::Regex("Respond ONLY with a valid JSON object".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices": [{"message": {"role": "assistant",
                "content": "{\"sr-Latn\": \"Hirurg\", \"ru\": \"Хирург\"}"}}]}"#,
        )
        .create_async()
        .await;

    let client =
        HttpOracleClient::new(oracle_config(format!("{}/v1/chat/completions", server.url())))
            .unwrap();
    let response = client.translate(&request()).await.unwrap();

    assert_eq!(
        response.translations.get("sr-Latn").map(String::as_str),
        Some("Hirurg")
    );
    assert_eq!(
        response.translations.get("ru").map(String::as_str),
        Some("Хирург")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let client =
        HttpOracleClient::new(oracle_config(format!("{}/v1/chat/completions", server.url())))
            .unwrap();
    let err = client.translate(&request()).await.unwrap_err();

    match err {
        OracleError::ClientError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid api key");
        }
        other => panic!("expected client error, got {other}"),
    }
}

#[tokio::test]
async fn test_one_request_per_translate_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("try later")
        .expect(1)
        .create_async()
        .await;

    let client =
        HttpOracleClient::new(oracle_config(format!("{}/v1/chat/completions", server.url())))
            .unwrap();
    let err = client.translate(&request()).await.unwrap_err();

    // No retry inside the client; the pipeline owns failure handling
    assert!(matches!(err, OracleError::ServerError { status: 503, .. }));
    mock.assert_async().await;
}
