//! Request handlers binding the task routes to [`TaskService`].

use super::{
    error::{ApiErrorResponse, ApiFault},
    extract::{RequestPath, TaskIdPath, ValidatedTaskRequest},
};
use crate::task::{dto::TaskResponse, ports::TaskRepository, services::TaskService};
use axum::{
    Json,
    extract::State,
    http::{Method, StatusCode, header},
    response::IntoResponse,
};
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared service handle stored as router state.
pub type SharedTaskService<R, C> = Arc<TaskService<R, C>>;

/// `GET /api/tasks/{id}`
///
/// # Errors
///
/// 400 for a non-positive id, 404 when the task does not exist, 500 when
/// storage fails.
pub async fn get_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    RequestPath(path): RequestPath,
    TaskIdPath(id): TaskIdPath,
) -> Result<Json<TaskResponse>, ApiErrorResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .get_task(id)
        .await
        .map(Json)
        .map_err(|err| ApiErrorResponse::from_service(err, path))
}

/// `GET /api/tasks`
///
/// # Errors
///
/// 500 when storage fails.
pub async fn list_tasks<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    RequestPath(path): RequestPath,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .get_all_tasks()
        .await
        .map(Json)
        .map_err(|err| ApiErrorResponse::from_service(err, path))
}

/// `POST /api/tasks`
///
/// Responds with 201 and a `Location` header naming the new task.
///
/// # Errors
///
/// 400 when the body is unreadable or violates field constraints, 500 when
/// storage fails.
pub async fn create_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    RequestPath(path): RequestPath,
    ValidatedTaskRequest(request): ValidatedTaskRequest,
) -> Result<impl IntoResponse, ApiErrorResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let created = service
        .create_task(request)
        .await
        .map_err(|err| ApiErrorResponse::from_service(err, path.as_str()))?;
    let Some(id) = created.id else {
        return Err(ApiErrorResponse::new(ApiFault::Unexpected, Some(path)));
    };
    let location = format!("{}/{id}", path.trim_end_matches('/'));
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// `PUT /api/tasks/{id}`
///
/// # Errors
///
/// 400 for a non-positive id or an invalid body, 404 when the task does not
/// exist, 500 when storage fails.
pub async fn update_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    RequestPath(path): RequestPath,
    TaskIdPath(id): TaskIdPath,
    ValidatedTaskRequest(request): ValidatedTaskRequest,
) -> Result<Json<TaskResponse>, ApiErrorResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .update_task(id, request)
        .await
        .map(Json)
        .map_err(|err| ApiErrorResponse::from_service(err, path))
}

/// `DELETE /api/tasks/{id}`
///
/// # Errors
///
/// 400 for a non-positive id, 404 when the task does not exist, 500 when
/// storage fails.
pub async fn delete_task<R, C>(
    State(service): State<SharedTaskService<R, C>>,
    RequestPath(path): RequestPath,
    TaskIdPath(id): TaskIdPath,
) -> Result<StatusCode, ApiErrorResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .delete_task(id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|err| ApiErrorResponse::from_service(err, path))
}

/// `GET /health`
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Fallback for paths that match no route.
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn route_not_found(RequestPath(path): RequestPath) -> ApiErrorResponse {
    let message = format!("No route for {path}");
    ApiErrorResponse::new(ApiFault::NotFound(message), Some(path))
}

/// Fallback for known paths requested with an unsupported method.
#[expect(clippy::unused_async, reason = "axum handlers must be async")]
pub async fn method_not_allowed(method: Method, RequestPath(path): RequestPath) -> ApiErrorResponse {
    let message = format!("Method {method} is not supported for {path}");
    ApiErrorResponse::new(ApiFault::MethodNotAllowed(message), Some(path))
}
