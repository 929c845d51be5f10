//! Integration tests for the text model client and the full HTTP surface.
//!
//! These tests verify:
//! 1. Gemini requests carry history in order and parse replies
//! 2. Gemini error statuses map to typed errors, with retries on transient ones
//! 3. `POST /api/respond` resolves to text, image or an apology against live-like services

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use canvas_chat::adapters::ai::{GeminiConfig, GeminiTextGenerator};
use canvas_chat::application::handlers::assistant::{IMAGE_FAILURE_MESSAGE, TEXT_FAILURE_MESSAGE};
use canvas_chat::config::{
    AiConfig, AppConfig, ClassifierConfig, ImageConfig, ServerConfig, StorageConfig,
};
use canvas_chat::domain::conversation::ConversationTurn;
use canvas_chat::ports::{AIError, TextGenerationRequest, TextGenerator};
use canvas_chat::server::{build_pipeline, build_router};

// =============================================================================
// Test Infrastructure
// =============================================================================

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn gemini(server: &MockServer, max_retries: u32) -> GeminiTextGenerator {
    GeminiTextGenerator::new(
        GeminiConfig::new("AIza-test")
            .with_base_url(server.uri())
            .with_max_retries(max_retries)
            .with_retry_base_delay(Duration::from_millis(1)),
    )
    .unwrap()
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5}
    }))
}

fn app_config(server: &MockServer) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        ai: AiConfig {
            gemini_api_key: Some(SecretString::new("AIza-test".to_string())),
            base_url: server.uri(),
            max_retries: 0,
            ..Default::default()
        },
        image: ImageConfig {
            endpoint: format!("{}/api/free/generate", server.uri()),
            ..Default::default()
        },
        storage: StorageConfig::new(server.uri(), SecretString::new("service-key".to_string())),
        classifier: ClassifierConfig::default(),
    }
}

async fn post_respond(config: &AppConfig, body: Value) -> (StatusCode, Value) {
    let app = build_router(config, build_pipeline(config).unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/respond")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Gemini Client
// =============================================================================

#[tokio::test]
async fn gemini_sends_history_and_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "AIza-test"))
        .respond_with(reply("Sure, here is more."))
        .expect(1)
        .mount(&server)
        .await;

    let request = TextGenerationRequest::new(
        vec![
            ConversationTurn::user("what is rust?"),
            ConversationTurn::assistant("A systems language."),
        ],
        "tell me more",
    );
    let response = gemini(&server, 0).generate(request).await.unwrap();

    assert_eq!(response.content, "Sure, here is more.");
    assert_eq!(response.usage.total_tokens, 17);

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body["contents"],
        json!([
            {"role": "user", "parts": [{"text": "what is rust?"}]},
            {"role": "model", "parts": [{"text": "A systems language."}]},
            {"role": "user", "parts": [{"text": "tell me more"}]}
        ])
    );
}

#[tokio::test]
async fn gemini_invalid_key_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT",
                      "details": [{"reason": "API_KEY_INVALID"}]}
        })))
        .mount(&server)
        .await;

    let result = gemini(&server, 3)
        .generate(TextGenerationRequest::new(vec![], "hi"))
        .await;

    assert!(matches!(result, Err(AIError::AuthenticationFailed)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn gemini_rate_limit_honours_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .mount(&server)
        .await;

    let result = gemini(&server, 0)
        .generate(TextGenerationRequest::new(vec![], "hi"))
        .await;

    assert!(matches!(
        result,
        Err(AIError::RateLimited {
            retry_after_secs: 12
        })
    ));
}

#[tokio::test]
async fn gemini_retries_transient_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("Recovered"))
        .mount(&server)
        .await;

    let response = gemini(&server, 3)
        .generate(TextGenerationRequest::new(vec![], "hi"))
        .await
        .unwrap();

    assert_eq!(response.content, "Recovered");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn gemini_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = gemini(&server, 2)
        .generate(TextGenerationRequest::new(vec![], "hi"))
        .await;

    assert!(matches!(result, Err(AIError::Unavailable { .. })));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

// =============================================================================
// HTTP Surface
// =============================================================================

#[tokio::test]
async fn respond_text_request_uses_cold_start_framing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(reply("Recursion is when a function calls itself."))
        .mount(&server)
        .await;

    let (status, body) = post_respond(&app_config(&server), json!({"prompt": "explain recursion"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": "Recursion is when a function calls itself."}));

    let received = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        sent["contents"][0]["parts"][0]["text"],
        "Please provide a comprehensive and helpful response to: explain recursion"
    );
}

#[tokio::test]
async fn respond_text_failure_returns_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (status, body) = post_respond(&app_config(&server), json!({"prompt": "explain recursion"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": TEXT_FAILURE_MESSAGE}));
}

#[tokio::test]
async fn respond_image_request_returns_hosted_url() {
    let server = MockServer::start().await;
    let complete = json!({"status": "complete", "imageUrl": format!("{}/files/city.png", server.uri())});
    let stream = format!("data: {{\"status\":\"processing\"}}\n\ndata: {}\n\n", complete);

    Mock::given(method("POST"))
        .and(path("/api/free/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(stream, "text/event-stream"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/city.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/generated-images/img_\d+\.png$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (status, body) = post_respond(
        &app_config(&server),
        json!({"prompt": "generate an image of a futuristic cityscape at sunset", "history": []}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "image");
    let content = body["content"].as_str().unwrap();
    assert!(content.starts_with(&format!(
        "{}/storage/v1/object/public/generated-images/img_",
        server.uri()
    )));

    let received = server.received_requests().await.unwrap();
    let generate: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        generate,
        json!({"prompt": "a futuristic cityscape at sunset", "model": "flux"})
    );
}

#[tokio::test]
async fn respond_image_failure_returns_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/free/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = post_respond(
        &app_config(&server),
        json!({"prompt": "draw a picture of a lighthouse"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": IMAGE_FAILURE_MESSAGE}));
}

#[tokio::test]
async fn respond_rejects_empty_prompt() {
    let server = MockServer::start().await;

    let (status, body) = post_respond(&app_config(&server), json!({"prompt": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn respond_slow_text_model_still_returns_apology_before_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let mut config = app_config(&server);
    config.server.request_timeout_secs = 2;
    config.ai.max_retries = 3;
    assert!(config.validate().is_ok());

    let start = std::time::Instant::now();
    let (status, body) = post_respond(&config, json!({"prompt": "explain rust"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"type": "text", "content": TEXT_FAILURE_MESSAGE}));
    assert!(start.elapsed() < config.server.request_timeout());
}
