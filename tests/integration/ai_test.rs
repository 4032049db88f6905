//! AI proxy endpoint tests against stub backends.

use axum::Json;
use axum::Router;
use axum::http::StatusCode as AxumStatus;
use axum::routing::post;
use http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, serve_stub};

fn completion_stub(reply: &'static str) -> Router {
    Router::new().route(
        "/",
        post(move |Json(req): Json<Value>| async move {
            // The proxy must prepend exactly one system turn.
            assert_eq!(req["messages"][0]["role"], "system");
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": reply } }]
            }))
        }),
    )
}

fn failing_stub(status: AxumStatus) -> Router {
    Router::new().route("/", post(move || async move { (status, "upstream error") }))
}

#[tokio::test]
async fn test_chat_proxy_round_trip() {
    let gateway = serve_stub(completion_stub("Claims are assessed per policy terms.")).await;
    let app = TestApp::new(&gateway, "http://127.0.0.1:9");

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/chat",
            Some(json!({ "messages": [{ "role": "user", "content": "How are claims assessed?" }] })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["response"],
        "Claims are assessed per policy terms."
    );
}

#[tokio::test]
async fn test_chat_proxy_requires_messages() {
    let app = TestApp::new("http://127.0.0.1:9", "http://127.0.0.1:9");
    let (status, body) = app
        .request("POST", "/api/ai/chat", Some(json!({ "messages": [] })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rate_limit_maps_to_429() {
    let gateway = serve_stub(failing_stub(AxumStatus::TOO_MANY_REQUESTS)).await;
    let app = TestApp::new(&gateway, "http://127.0.0.1:9");

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/chat",
            Some(json!({ "messages": [{ "role": "user", "content": "hi" }] })),
        )
        .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "RATE_LIMIT");
    assert_eq!(
        body["message"],
        "Rate limit exceeded. Please try again later."
    );
}

#[tokio::test]
async fn test_payment_required_maps_to_402() {
    let gateway = serve_stub(failing_stub(AxumStatus::PAYMENT_REQUIRED)).await;
    let app = TestApp::new(&gateway, "http://127.0.0.1:9");

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/chat",
            Some(json!({ "messages": [{ "role": "user", "content": "hi" }] })),
        )
        .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], "PAYMENT_REQUIRED");
    assert_eq!(body["message"], "Payment required. Please add credits.");
}

#[tokio::test]
async fn test_gateway_failure_stays_generic() {
    let gateway = serve_stub(failing_stub(AxumStatus::INTERNAL_SERVER_ERROR)).await;
    let app = TestApp::new(&gateway, "http://127.0.0.1:9");

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/chat",
            Some(json!({ "messages": [{ "role": "user", "content": "hi" }] })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "AI gateway error");
}

#[tokio::test]
async fn test_docqa_vision_path() {
    let docqa = serve_stub(Router::new().route(
        "/",
        post(|| async {
            Json(json!({ "output": "The deductible is $500", "confidence": 0.93 }))
        }),
    ))
    .await;
    let app = TestApp::new("http://127.0.0.1:9", &docqa);

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/documents/qa",
            Some(json!({
                "url": "https://files.example.com/policy.pdf",
                "question": "What is the deductible?",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["answer"], "The deductible is $500");
    assert_eq!(body["data"]["source"], "docvqa");
    assert_eq!(body["data"]["confidence"], 0.93);
}

#[tokio::test]
async fn test_docqa_falls_back_to_gateway() {
    let docqa = serve_stub(failing_stub(AxumStatus::INTERNAL_SERVER_ERROR)).await;
    let gateway = serve_stub(completion_stub(
        "Water damage is covered. Reference: Page 7, Section 2.1",
    ))
    .await;
    let app = TestApp::new(&gateway, &docqa);

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/documents/qa",
            Some(json!({
                "url": "https://files.example.com/policy.pdf",
                "question": "Is water damage covered?",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source"], "ai_analysis");
    assert_eq!(body["data"]["page_number"], 7);
    assert_eq!(body["data"]["section"], "2.1");
}

#[tokio::test]
async fn test_docqa_both_paths_failing_is_structured() {
    let docqa = serve_stub(failing_stub(AxumStatus::INTERNAL_SERVER_ERROR)).await;
    let gateway = serve_stub(failing_stub(AxumStatus::INTERNAL_SERVER_ERROR)).await;
    let app = TestApp::new(&gateway, &docqa);

    let (status, body) = app
        .request(
            "POST",
            "/api/ai/documents/qa",
            Some(json!({
                "url": "https://files.example.com/policy.pdf",
                "question": "Is water damage covered?",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to process document");
}

#[tokio::test]
async fn test_docqa_rejects_blank_question() {
    let app = TestApp::new("http://127.0.0.1:9", "http://127.0.0.1:9");
    let (status, body) = app
        .request(
            "POST",
            "/api/ai/documents/qa",
            Some(json!({ "url": "https://files.example.com/policy.pdf", "question": "  " })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}
