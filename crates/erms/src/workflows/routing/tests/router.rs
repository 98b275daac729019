use super::common::*;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::routing::router::routing_router;

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn router_with_seeded_case(
    case_id: &str,
    filled: usize,
) -> (
    axum::Router,
    Arc<MemoryRoutingRepository>,
    Arc<MemoryFieldStore>,
) {
    let (service, repository, fields) = build_service();
    fields.seed(&case(case_id), filled_fields(filled));
    (routing_router(Arc::new(service)), repository, fields)
}

async fn post_json(router: axum::Router, uri: &str, payload: Value) -> Response {
    router
        .oneshot(
            axum::http::Request::post(uri)
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).expect("serialize payload"),
                ))
                .expect("build request"),
        )
        .await
        .expect("route executes")
}

fn start_payload() -> Value {
    json!({
        "initiator_id": "clerk-1",
        "initiator_level": "clerk",
        "assign_to": "jane",
    })
}

#[tokio::test]
async fn start_route_creates_an_assignment() {
    let (router, _repository, _fields) = router_with_seeded_case("case-200", 10);

    let response = post_json(
        router,
        "/api/v1/cases/case-200/routing",
        start_payload(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["level"], "officer");
    assert_eq!(payload["status"], "assigned");
    assert_eq!(payload["assigned_to"], "jane");
}

#[tokio::test]
async fn start_route_rejects_an_incomplete_case() {
    let (router, repository, _fields) = router_with_seeded_case("case-201", 4);

    let response = post_json(
        router,
        "/api/v1/cases/case-201/routing",
        start_payload(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(repository.assignment_count(&case("case-201")), 0);
}

#[tokio::test]
async fn double_start_returns_conflict() {
    let (router, _repository, _fields) = router_with_seeded_case("case-202", 10);

    let first = post_json(
        router.clone(),
        "/api/v1/cases/case-202/routing",
        start_payload(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        router,
        "/api/v1/cases/case-202/routing",
        start_payload(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn forward_route_requires_the_holder() {
    let (router, _repository, _fields) = router_with_seeded_case("case-203", 10);

    let started = post_json(
        router.clone(),
        "/api/v1/cases/case-203/routing",
        start_payload(),
    )
    .await;
    assert_eq!(started.status(), StatusCode::CREATED);

    let response = post_json(
        router,
        "/api/v1/cases/case-203/routing/forward",
        json!({ "actor_id": "impostor", "target_id": "raj" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn current_route_reports_an_unrouted_case() {
    let (router, _repository, _fields) = router_with_seeded_case("case-204", 10);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/cases/case-204/routing")
                .body(axum::body::Body::empty())
                .expect("build request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "unassigned");
}

#[tokio::test]
async fn history_route_lists_events_newest_first() {
    let (router, _repository, _fields) = router_with_seeded_case("case-205", 10);

    post_json(
        router.clone(),
        "/api/v1/cases/case-205/routing",
        start_payload(),
    )
    .await;
    post_json(
        router.clone(),
        "/api/v1/cases/case-205/routing/forward",
        json!({ "actor_id": "jane", "target_id": "raj", "comments": "verified" }),
    )
    .await;

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/cases/case-205/routing/history")
                .body(axum::body::Body::empty())
                .expect("build request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let events = payload.as_array().expect("history array");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["action"], "forwarded");
    assert_eq!(events[1]["action"], "assigned");
}

#[tokio::test]
async fn complete_route_is_forbidden_for_junior_levels() {
    let (router, _repository, _fields) = router_with_seeded_case("case-206", 10);

    post_json(
        router.clone(),
        "/api/v1/cases/case-206/routing",
        start_payload(),
    )
    .await;

    let response = post_json(
        router,
        "/api/v1/cases/case-206/routing/complete",
        json!({ "actor_id": "jane" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
