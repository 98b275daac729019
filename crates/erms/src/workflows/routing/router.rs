use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::workflows::cases::{CaseId, CustodianId};
use crate::workflows::status::CaseFieldStore;

use super::domain::{Custodian, CustodianLevel};
use super::repository::{RepositoryError, RoutingRepository};
use super::service::{FileRoutingService, RoutingError};

/// Router builder exposing HTTP endpoints for the routing lifecycle.
pub fn routing_router<R, S>(service: Arc<FileRoutingService<R, S>>) -> Router
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/cases/:case_id/routing",
            post(start_handler::<R, S>).get(current_handler::<R, S>),
        )
        .route(
            "/api/v1/cases/:case_id/routing/forward",
            post(forward_handler::<R, S>),
        )
        .route(
            "/api/v1/cases/:case_id/routing/revert",
            post(revert_handler::<R, S>),
        )
        .route(
            "/api/v1/cases/:case_id/routing/reassign",
            post(reassign_handler::<R, S>),
        )
        .route(
            "/api/v1/cases/:case_id/routing/complete",
            post(complete_handler::<R, S>),
        )
        .route(
            "/api/v1/cases/:case_id/routing/history",
            get(history_handler::<R, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct StartRoutingRequest {
    pub initiator_id: String,
    pub initiator_level: CustodianLevel,
    pub assign_to: String,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub actor_id: String,
    pub target_id: String,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub actor_id: String,
    #[serde(default)]
    pub comments: Option<String>,
}

pub(crate) async fn start_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<StartRoutingRequest>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    let initiator = Custodian {
        id: CustodianId(request.initiator_id),
        level: request.initiator_level,
    };
    let assign_to = CustodianId(request.assign_to);

    match service.start_routing(&case_id, &initiator, &assign_to, request.comments) {
        Ok(assignment) => (StatusCode::CREATED, axum::Json(assignment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn forward_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    match service.forward(
        &case_id,
        &CustodianId(request.actor_id),
        &CustodianId(request.target_id),
        request.comments,
    ) {
        Ok(assignment) => (StatusCode::OK, axum::Json(assignment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn revert_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    match service.revert(
        &case_id,
        &CustodianId(request.actor_id),
        &CustodianId(request.target_id),
        request.comments,
    ) {
        Ok(assignment) => (StatusCode::OK, axum::Json(assignment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reassign_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<TransitionRequest>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    match service.reassign(
        &case_id,
        &CustodianId(request.actor_id),
        &CustodianId(request.target_id),
        request.comments,
    ) {
        Ok(assignment) => (StatusCode::OK, axum::Json(assignment.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<CompleteRequest>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    match service.complete(&case_id, &CustodianId(request.actor_id), request.comments) {
        Ok(()) => {
            let payload = json!({ "case_id": case_id.0, "status": "completed" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn current_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    match service.current_assignment(&case_id) {
        Ok(Some(assignment)) => (StatusCode::OK, axum::Json(assignment.view())).into_response(),
        Ok(None) => {
            let payload = json!({ "case_id": case_id.0, "status": "unassigned" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R, S>(
    State(service): State<Arc<FileRoutingService<R, S>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: RoutingRepository + 'static,
    S: CaseFieldStore + 'static,
{
    let case_id = CaseId(case_id);
    match service.history(&case_id) {
        Ok(events) => (StatusCode::OK, axum::Json(events)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RoutingError) -> Response {
    let status = match &error {
        RoutingError::IncompleteCase { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        RoutingError::NotCurrentHolder { .. } | RoutingError::InvalidRole { .. } => {
            StatusCode::FORBIDDEN
        }
        RoutingError::NoActiveAssignment(_) => StatusCode::NOT_FOUND,
        RoutingError::Repository(RepositoryError::Conflict)
        | RoutingError::Repository(RepositoryError::ConcurrentModification) => StatusCode::CONFLICT,
        RoutingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RoutingError::FieldStore(crate::workflows::cases::FieldStoreError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
