//! Health endpoint tests.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new("http://127.0.0.1:9", "http://127.0.0.1:9");
    let (status, body) = app.request("GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new("http://127.0.0.1:9", "http://127.0.0.1:9");
    let (status, _) = app.request("GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
