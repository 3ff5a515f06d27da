use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::Ordering;
use tower::ServiceExt;

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-request-id", "smoke-1")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn livez_is_healthy_and_echoes_request_id() {
    let app = sm_api::create_router(sm_api::test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/livez")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "abc-123");
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn readyz_returns_service_unavailable_when_not_ready() {
    let state = sm_api::test_state();
    state.readiness.store(false, Ordering::SeqCst);
    let app = sm_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["code"], "service_unavailable");
}

#[tokio::test]
async fn unknown_proficiency_level_is_rejected() {
    let app = sm_api::create_router(sm_api::test_state());

    let response = app
        .oneshot(post_json(
            "/api/matches/projects",
            r#"{"skills":[{"name":"Rust","level":"GURU","years_of_experience":3}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "bad_request");
    assert_eq!(body["request_id"], "smoke-1");
    assert!(body["message"].as_str().unwrap().contains("GURU"));
}

#[tokio::test]
async fn negative_experience_is_rejected() {
    let app = sm_api::create_router(sm_api::test_state());

    let response = app
        .oneshot(post_json(
            "/api/matches/candidates",
            r#"{"required_skills":[{"name":"Go","level":"EXPERT","years_of_experience":-1}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "bad_request");
}

#[tokio::test]
async fn out_of_range_threshold_is_rejected() {
    let app = sm_api::create_router(sm_api::test_state());

    let response = app
        .oneshot(post_json(
            "/api/matches/projects",
            r#"{"skills":[],"min_score":120}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("0..=100"));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = sm_api::create_router(sm_api::test_state());

    let response = app
        .oneshot(post_json("/api/matches/candidates", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
