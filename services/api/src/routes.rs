use crate::infra::{AppState, InMemoryCaseFieldStore, InMemoryRoutingRepository, InMemoryStatusLedger};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use erms::workflows::cases::{CaseId, FieldStoreError};
use erms::workflows::routing::{routing_router, FileRoutingService};
use erms::workflows::status::{CaseStatusService, Workflow};

pub(crate) type StatusService = CaseStatusService<InMemoryCaseFieldStore, InMemoryStatusLedger>;
pub(crate) type RoutingService = FileRoutingService<InMemoryRoutingRepository, InMemoryCaseFieldStore>;

/// Full application router: routing lifecycle, status views, and the
/// operational endpoints.
pub(crate) fn app_router(
    routing: Arc<RoutingService>,
    status: Arc<StatusService>,
) -> Router {
    routing_router(routing)
        .route(
            "/api/v1/cases/:case_id/status",
            get(status_handler).with_state(status.clone()),
        )
        .route(
            "/api/v1/cases/:case_id/status/reconcile",
            post(reconcile_handler).with_state(status),
        )
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    pub(crate) workflow: Workflow,
}

pub(crate) async fn status_handler(
    axum::extract::State(service): axum::extract::State<Arc<StatusService>>,
    Path(case_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let case_id = CaseId(case_id);
    match service.completion(&case_id, query.workflow) {
        Ok(report) => {
            let payload = json!({
                "case_id": case_id.0,
                "workflow": query.workflow,
                "status": report.status().label(),
                "percent": report.percent(),
                "total": report.total,
                "touched": report.touched,
                "completable": report.completable,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => field_store_error_response(&case_id, error),
    }
}

pub(crate) async fn reconcile_handler(
    axum::extract::State(service): axum::extract::State<Arc<StatusService>>,
    Path(case_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let case_id = CaseId(case_id);
    match service.reconcile(&case_id, query.workflow) {
        Ok(status) => {
            let payload = json!({
                "case_id": case_id.0,
                "workflow": query.workflow,
                "status": status.label(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => field_store_error_response(&case_id, error),
    }
}

fn field_store_error_response(case_id: &CaseId, error: FieldStoreError) -> Response {
    let status = match error {
        FieldStoreError::NotFound => StatusCode::NOT_FOUND,
        FieldStoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "case_id": case_id.0, "error": error.to_string() });
    (status, Json(payload)).into_response()
}

async fn health_handler() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

async fn ready_handler(Extension(state): Extension<AppState>) -> Response {
    if state.readiness.load(Ordering::Acquire) {
        (StatusCode::OK, Json(json!({ "ready": true }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ready": false })),
        )
            .into_response()
    }
}

async fn metrics_handler(Extension(state): Extension<AppState>) -> Response {
    state.metrics.render().into_response()
}
