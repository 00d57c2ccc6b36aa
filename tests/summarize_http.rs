// tests/summarize_http.rs
use std::sync::Arc;

use mockito::Matcher;
use news_digest_bot::summarize::{
    ChatCompletionsClient, Summarizer, SummarizerSettings, GENERATION_FAILED,
};
use serde_json::json;

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "model": "llama-3.1-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn summarizer(base: String, key: &str) -> Summarizer {
    let client = ChatCompletionsClient::new(base, key).expect("client");
    Summarizer::new(Arc::new(client), SummarizerSettings::default())
}

#[tokio::test]
async fn sends_fixed_parameters_and_trims_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama-3.1-70b-versatile",
            "max_tokens": 180
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("  Markets calm today. #news \n"))
        .create_async()
        .await;

    let out = summarizer(server.url(), "test-key").summarize("[desk] t\ns\nl").await;

    assert_eq!(out, "Markets calm today. #news");
    mock.assert_async().await;
}

#[tokio::test]
async fn reply_of_300_chars_is_cut_to_exactly_280() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(&"z".repeat(300)))
        .create_async()
        .await;

    let out = summarizer(server.url(), "k").summarize("bulletin").await;

    assert_eq!(out.chars().count(), 280);
    assert_eq!(out, format!("{}...", "z".repeat(277)));
}

#[tokio::test]
async fn server_error_returns_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let out = summarizer(server.url(), "k").summarize("bulletin").await;
    assert_eq!(out, GENERATION_FAILED);
}

#[tokio::test]
async fn malformed_body_returns_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let out = summarizer(server.url(), "k").summarize("bulletin").await;
    assert_eq!(out, GENERATION_FAILED);
}

#[tokio::test]
async fn missing_api_key_never_calls_out() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let out = summarizer(server.url(), "").summarize("bulletin").await;
    assert_eq!(out, GENERATION_FAILED);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_service_returns_fallback() {
    // Port 9 (discard) on localhost: connection refused.
    let out = summarizer("http://127.0.0.1:9".to_string(), "k").summarize("bulletin").await;
    assert_eq!(out, GENERATION_FAILED);
}
