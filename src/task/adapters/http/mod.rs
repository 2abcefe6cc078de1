//! HTTP adapter exposing the task service as a JSON REST API.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod validation;

use crate::task::{ports::TaskRepository, services::TaskService};
use axum::{Router, routing::get};
use mockable::Clock;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use error::{ApiErrorResponse, ApiFault, ErrorBody};
pub use validation::{FieldViolation, ValidationFailure, validate_task_request};

/// Builds the task API router around a shared service.
///
/// Routes:
///
/// - `GET /api/tasks`, `POST /api/tasks`
/// - `GET /api/tasks/{id}`, `PUT /api/tasks/{id}`, `DELETE /api/tasks/{id}`
/// - `GET /health`
///
/// Unknown paths answer 404 and unsupported methods answer 405, both with
/// the uniform error body.
#[must_use]
pub fn router<R, C>(service: Arc<TaskService<R, C>>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks::<R, C>).post(handlers::create_task::<R, C>),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::get_task::<R, C>)
                .put(handlers::update_task::<R, C>)
                .delete(handlers::delete_task::<R, C>),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
}
