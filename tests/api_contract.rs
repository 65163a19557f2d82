//! End-to-end checks of the catalogue service router

use ai_api_contract::{
    config::Settings,
    error::{NotFoundResponse, ValidationErrorResponse},
    server::{create_router, AppState},
};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router_with(settings: Settings) -> Router {
    create_router(AppState::new(settings))
}

fn router() -> Router {
    router_with(Settings::default())
}

async fn send(router: Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(&body.to_string())).await
}

#[tokio::test]
async fn health_reports_catalogue_size() {
    let (status, body) = send(router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["operations"], 18);

    let (status, body) = send(router(), Method::GET, "/liveness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alive"], true);
}

#[tokio::test]
async fn lists_every_operation() {
    let (status, body) = send(router(), Method::GET, "/v1/operations", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 18);
    assert!(data.iter().any(|op| op["path"] == "text/plagia_detection"));
}

#[tokio::test]
async fn describes_one_operation() {
    let (status, body) = send(router(), Method::GET, "/v1/operations/text/chat", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "text/chat");
    assert_eq!(
        body["request"]["properties"]["temperature"]["maximum"],
        json!(2.0)
    );
}

#[tokio::test]
async fn unknown_operation_is_404() {
    let (status, body) = send(router(), Method::GET, "/v1/operations/image/generation", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: NotFoundResponse = serde_json::from_value(body).unwrap();
    assert!(body.details.contains("image/generation"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, body) = send(router(), Method::GET, "/v2/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"details": "Not found."}));
}

#[tokio::test]
async fn serves_openapi_document() {
    let (status, body) = send(router(), Method::GET, "/v1/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["openapi"], "3.1.0");
    assert!(body["paths"]["/v2/text/summarize/"].is_object());
}

#[tokio::test]
async fn accepts_conforming_request() {
    let (status, body) = post_json(
        router(),
        "/v1/validate/text/generation/request",
        json!({"providers": ["openai", "anthropic"], "text": "Hello", "temperature": 0.3}),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["valid"], true);
    assert_eq!(body["operation"], "text/generation");
    assert_eq!(body["providers"], json!(["openai", "anthropic"]));
}

#[tokio::test]
async fn missing_providers_is_400() {
    let (status, body) = post_json(
        router(),
        "/v1/validate/text/generation/request",
        json!({"text": "Hello"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: ValidationErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(body.error.type_, "invalid_request_error");
    assert_eq!(
        body.error.message.get("providers").unwrap(),
        ["This field is required."]
    );
}

#[tokio::test]
async fn chat_temperature_bound() {
    let (status, body) = post_json(
        router(),
        "/v1/validate/text/chat/request",
        json!({"providers": ["openai"], "text": "Hi", "temperature": 2.5}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"]["temperature"],
        json!(["Ensure this value is less than or equal to 2."])
    );
}

#[tokio::test]
async fn too_many_fallback_providers() {
    let (status, body) = post_json(
        router(),
        "/v1/validate/text/embeddings/request",
        json!({
            "providers": ["openai"],
            "fallback_providers": ["google", "cohere", "mistral", "jina", "amazon", "openai"],
            "texts": ["a"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]["fallback_providers"].is_array());
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (status, body) = send(
        router(),
        Method::POST,
        "/v1/validate/text/generation/request",
        Some("{\"providers\": ["),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn unknown_fields_follow_settings() {
    let body = json!({"providers": ["openai"], "text": "Hi", "top_p": 0.9});

    let (status, _) = post_json(router(), "/v1/validate/text/generation/request", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let strict = Settings {
        reject_unknown_fields: true,
        ..Settings::default()
    };
    let (status, body) = post_json(router_with(strict), "/v1/validate/text/generation/request", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"]["top_p"], json!(["Unknown field."]));
}

#[tokio::test]
async fn response_status_spelling() {
    let ok = json!({"openai": {"status": "sucess", "generated_text": "Hi"}});
    let (status, body) = post_json(router(), "/v1/validate/text/generation/response", ok).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["providers"], json!(["openai"]));

    let misspelled = json!({"openai": {"status": "success", "generated_text": "Hi"}});
    let (status, body) = post_json(router(), "/v1/validate/text/generation/response", misspelled).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]["openai.status"].is_array());
}

#[tokio::test]
async fn list_response_with_failed_provider() {
    let body = json!([
        {"provider": "openai", "status": "sucess", "generated_text": "Hi"},
        {"provider": "anthropic", "status": "fail", "error": {"message": "Overloaded"}}
    ]);
    let (status, body) = post_json(router(), "/v1/validate/text/generation/response", body).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["providers"], json!(["openai", "anthropic"]));

    let without_error = json!([{"provider": "anthropic", "status": "fail"}]);
    let (status, body) = post_json(router(), "/v1/validate/text/generation/response", without_error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"]["[0].error"],
        json!(["This field is required."])
    );
}

#[tokio::test]
async fn response_missing_output_field() {
    let body = json!({
        "google": {"status": "sucess", "general_sentiment": "Positive", "items": []}
    });
    let (status, body) = post_json(router(), "/v1/validate/text/sentiment_analysis/response", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"]["google.general_sentiment_rate"],
        json!(["This field is required."])
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let settings = Settings {
        max_body_bytes: 64,
        ..Settings::default()
    };
    let text = "x".repeat(256);
    let (status, _) = post_json(
        router_with(settings),
        "/v1/validate/text/generation/request",
        json!({"providers": ["openai"], "text": text}),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn echoes_trace_id() {
    let request = Request::builder()
        .uri("/liveness")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-trace-id"], "req-42");
    assert_eq!(response.headers()["x-request-id"], "req-42");
}
