//! Request extractors for the task API.
//!
//! Rejections are rendered through [`ApiErrorResponse`] so that malformed
//! ids and bodies produce the same error payload as service faults.

use super::{
    error::{ApiErrorResponse, ApiFault},
    validation::validate_task_request,
};
use crate::task::dto::TaskRequest;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
};
use serde_json::Value;
use std::convert::Infallible;

/// Path of the current request, used to label error responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath(pub String);

impl<S> FromRequestParts<S> for RequestPath
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.uri.path().to_owned()))
    }
}

/// The `{id}` path segment parsed as a signed integer.
///
/// Range checks are left to the service so that a non-positive id is
/// reported by the same rule for every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIdPath(pub i64);

impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_owned();
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiErrorResponse::new(ApiFault::InvalidInput(rejection.body_text()), Some(path.clone()))
            })?;
        raw.parse::<i64>().map(Self).map_err(|_| {
            ApiErrorResponse::new(
                ApiFault::InvalidInput(format!("Invalid task ID: {raw}")),
                Some(path),
            )
        })
    }
}

/// A task request body that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTaskRequest(pub TaskRequest);

impl<S> FromRequest<S> for ValidatedTaskRequest
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_owned();
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| body_rejection(&rejection, path.clone()))?;
        let Value::Object(fields) = body else {
            return Err(ApiErrorResponse::new(
                ApiFault::InvalidInput("Request body must be a JSON object".to_owned()),
                Some(path),
            ));
        };
        validate_task_request(&fields).map(Self).map_err(|failure| {
            ApiErrorResponse::new(ApiFault::ValidationFailed(failure.0), Some(path))
        })
    }
}

/// Classifies a body rejection; an oversized body keeps its 413 status.
fn body_rejection(rejection: &JsonRejection, path: String) -> ApiErrorResponse {
    let fault = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiFault::PayloadTooLarge(rejection.body_text())
    } else {
        ApiFault::InvalidInput(rejection.body_text())
    };
    ApiErrorResponse::new(fault, Some(path))
}
