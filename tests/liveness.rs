use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use super_bot::liveness::{router, LIVENESS_TEXT};
use tower::ServiceExt;

async fn get(path: &str) -> (StatusCode, String) {
    let response = router()
        .oneshot(Request::get(path).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn root_reports_running() {
    assert_eq!(get("/").await, (StatusCode::OK, LIVENESS_TEXT.to_string()));
}

#[tokio::test]
async fn health_reports_ok() {
    assert_eq!(get("/health").await, (StatusCode::OK, "OK".to_string()));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, _) = get("/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
