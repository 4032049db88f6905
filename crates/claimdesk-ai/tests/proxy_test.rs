//! End-to-end tests for the AI clients against local stub servers.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};

use claimdesk_ai::docqa::AnswerSource;
use claimdesk_ai::{CaseContext, ChatTurn, DocQaClient, GatewayClient};
use claimdesk_core::config::AiConfig;
use claimdesk_core::error::ErrorKind;

/// Binds a stub server and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(base: &str) -> AiConfig {
    AiConfig {
        gateway_url: format!("{base}/v1/chat/completions"),
        gateway_api_key: "test-key".to_string(),
        model: "google/gemini-2.5-flash".to_string(),
        docqa_url: format!("{base}/vision"),
        docqa_api_key: "test-key".to_string(),
        request_timeout_seconds: 5,
        temperature: 0.7,
        max_tokens: 2048,
    }
}

fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

#[tokio::test]
async fn test_chat_completion_round_trip() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<Value>| async move {
            // The system instruction must arrive as the first message.
            let first = &body["messages"][0];
            assert_eq!(first["role"], "system");
            assert!(
                first["content"]
                    .as_str()
                    .unwrap()
                    .contains("Current Case Context")
            );
            Json(completion("File under comprehensive coverage."))
        }),
    );
    let base = serve(app).await;
    let gateway = GatewayClient::new(config(&base)).unwrap();

    let context = CaseContext {
        claim_type: "Auto".to_string(),
        state: "CA".to_string(),
        claim_amount: "$12,000".to_string(),
        policy_number: "POL-4411".to_string(),
        customer_name: "Alice Moran".to_string(),
        date_of_incident: "2026-07-14".to_string(),
        description: "Rear-end collision".to_string(),
    };
    let answer = claimdesk_ai::chat::complete(
        &gateway,
        &[ChatTurn::user("Which coverage applies?")],
        Some(&context),
    )
    .await
    .unwrap();
    assert_eq!(answer, "File under comprehensive coverage.");
}

#[tokio::test]
async fn test_gateway_rate_limit_keeps_identity() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "slow down" })),
            )
        }),
    );
    let base = serve(app).await;
    let gateway = GatewayClient::new(config(&base)).unwrap();

    let err = gateway
        .complete(&[ChatTurn::user("hi")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimit);
    assert_eq!(err.message, "Rate limit exceeded. Please try again later.");
}

#[tokio::test]
async fn test_gateway_payment_required_keeps_identity() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            (
                StatusCode::PAYMENT_REQUIRED,
                Json(json!({ "error": "no credits" })),
            )
        }),
    );
    let base = serve(app).await;
    let gateway = GatewayClient::new(config(&base)).unwrap();

    let err = gateway
        .complete(&[ChatTurn::user("hi")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PaymentRequired);
    assert_eq!(err.message, "Payment required. Please add credits.");
}

#[tokio::test]
async fn test_gateway_other_errors_collapse_to_generic() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "secret upstream detail" })),
            )
        }),
    );
    let base = serve(app).await;
    let gateway = GatewayClient::new(config(&base)).unwrap();

    let err = gateway
        .complete(&[ChatTurn::user("hi")])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert_eq!(err.message, "AI gateway error");
}

#[tokio::test]
async fn test_docqa_uses_vision_backend_when_healthy() {
    let app = Router::new().route(
        "/vision",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["url"], "https://example.com/policy.pdf");
            Json(json!({
                "output": "The deductible is $500",
                "page_number": 3,
                "confidence": 0.92,
            }))
        }),
    );
    let base = serve(app).await;
    let cfg = config(&base);
    let client = DocQaClient::new(cfg.clone(), GatewayClient::new(cfg).unwrap()).unwrap();

    let answer = client
        .answer("https://example.com/policy.pdf", "What is the deductible?")
        .await
        .unwrap();
    assert_eq!(answer.answer, "The deductible is $500");
    assert_eq!(answer.page_number, Some(3));
    assert_eq!(answer.confidence, Some(0.92));
    assert_eq!(answer.source, AnswerSource::Docvqa);
}

#[tokio::test]
async fn test_docqa_falls_back_to_gateway() {
    let app = Router::new()
        .route(
            "/vision",
            post(|| async { (StatusCode::BAD_GATEWAY, Json(json!({ "error": "down" }))) }),
        )
        .route(
            "/v1/chat/completions",
            post(|| async {
                Json(completion(
                    "The deductible is $500. Reference: Page 12, Section 4.2",
                ))
            }),
        );
    let base = serve(app).await;
    let cfg = config(&base);
    let client = DocQaClient::new(cfg.clone(), GatewayClient::new(cfg).unwrap()).unwrap();

    let answer = client
        .answer("https://example.com/policy.pdf", "What is the deductible?")
        .await
        .unwrap();
    assert_eq!(answer.source, AnswerSource::AiAnalysis);
    assert_eq!(answer.page_number, Some(12));
    assert_eq!(answer.section.as_deref(), Some("4.2"));
    assert_eq!(answer.confidence, None);
}

#[tokio::test]
async fn test_docqa_both_paths_failing_is_structured() {
    let app = Router::new()
        .route(
            "/vision",
            post(|| async { (StatusCode::BAD_GATEWAY, Json(json!({ "error": "down" }))) }),
        )
        .route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "down too" })),
                )
            }),
        );
    let base = serve(app).await;
    let cfg = config(&base);
    let client = DocQaClient::new(cfg.clone(), GatewayClient::new(cfg).unwrap()).unwrap();

    let err = client
        .answer("https://example.com/policy.pdf", "What is the deductible?")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert_eq!(err.message, "Failed to process document");
}

#[tokio::test]
async fn test_docqa_rejects_blank_input() {
    let cfg = config("http://127.0.0.1:1");
    let client = DocQaClient::new(cfg.clone(), GatewayClient::new(cfg).unwrap()).unwrap();
    let err = client.answer("", "question").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_search_ranks_against_stub() {
    let doc = claimdesk_ai::CandidateDocument {
        id: uuid::Uuid::new_v4(),
        title: "CA Auto Policy".to_string(),
        description: Some("Collision and comprehensive coverage".to_string()),
        category: "Policies".to_string(),
        file_url: "https://example.com/ca-auto.pdf".to_string(),
    };
    let id = doc.id;
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |Json(body): Json<Value>| async move {
            let prompt = body["messages"][0]["content"].as_str().unwrap();
            assert!(prompt.contains("collision coverage"));
            let ranking = json!({
                "results": [
                    { "id": id, "relevance_score": 0.93, "explanation": "Covers collisions" }
                ],
                "summary": "One policy document matches."
            });
            Json(completion(&ranking.to_string()))
        }),
    );
    let base = serve(app).await;
    let gateway = GatewayClient::new(config(&base)).unwrap();

    let outcome = claimdesk_ai::search::rank(&gateway, "collision coverage", &[doc])
        .await
        .unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].id, id);
    assert!((outcome.results[0].relevance_score - 0.93).abs() < 1e-9);
    assert_eq!(outcome.summary, "One policy document matches.");
}
