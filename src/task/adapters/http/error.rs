//! Fault-to-response mapping for the task API.
//!
//! Every failure leaving the HTTP adapter is classified as an [`ApiFault`]
//! and rendered through [`ApiErrorResponse`], so that status codes, labels
//! and the error body shape are decided in exactly one place.

use super::validation::FieldViolation;
use crate::task::services::TaskServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::{error, warn};

const VALIDATION_MESSAGE: &str = "Validation failed for one or more fields";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";

/// Classified failure of a task API request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFault {
    /// The requested task or route does not exist.
    NotFound(String),
    /// The route exists but does not accept the request method.
    MethodNotAllowed(String),
    /// The request body exceeds the accepted size.
    PayloadTooLarge(String),
    /// A malformed argument such as a non-positive id or an unreadable body.
    InvalidInput(String),
    /// Field constraints on the request body were violated.
    ValidationFailed(Vec<FieldViolation>),
    /// Storage failed; the message is generic.
    Internal(String),
    /// Anything else, including panics.
    Unexpected,
}

impl ApiFault {
    /// Returns the HTTP status and error label for this fault.
    #[must_use]
    pub const fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Resource Not Found"),
            Self::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large"),
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            Self::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "Validation Failed"),
            Self::Internal(_) | Self::Unexpected => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound(message)
            | Self::MethodNotAllowed(message)
            | Self::PayloadTooLarge(message)
            | Self::InvalidInput(message)
            | Self::Internal(message) => message.clone(),
            Self::ValidationFailed(_) => VALIDATION_MESSAGE.to_owned(),
            Self::Unexpected => UNEXPECTED_MESSAGE.to_owned(),
        }
    }
}

/// Uniform JSON error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// When the error was rendered.
    pub timestamp: DateTime<Utc>,
    /// Numeric HTTP status.
    pub status: u16,
    /// Short error category label.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Request path, when known.
    pub path: Option<String>,
    /// Per-field violations for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<FieldViolation>>,
}

/// A fault bound to the request it occurred in.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    fault: ApiFault,
    path: Option<String>,
    cause: Option<String>,
}

impl ApiErrorResponse {
    /// Creates an error response for `fault` raised while serving `path`.
    #[must_use]
    pub const fn new(fault: ApiFault, path: Option<String>) -> Self {
        Self {
            fault,
            path,
            cause: None,
        }
    }

    /// Classifies a service error raised while serving `path`.
    ///
    /// The underlying storage error of an internal failure is kept for the
    /// server log only.
    #[must_use]
    pub fn from_service(err: TaskServiceError, path: impl Into<String>) -> Self {
        let message = err.to_string();
        let (fault, cause) = match err {
            TaskServiceError::NotFound(_) => (ApiFault::NotFound(message), None),
            TaskServiceError::InvalidInput(_) => (ApiFault::InvalidInput(message), None),
            TaskServiceError::Internal { source, .. } => {
                (ApiFault::Internal(message), Some(source.to_string()))
            }
        };
        Self {
            fault,
            path: Some(path.into()),
            cause,
        }
    }

    /// Returns the classified fault.
    #[must_use]
    pub const fn fault(&self) -> &ApiFault {
        &self.fault
    }

    fn into_body(self) -> (StatusCode, ErrorBody) {
        let (status, label) = self.fault.status_and_label();
        let message = self.fault.message();
        let validation_errors = match self.fault {
            ApiFault::ValidationFailed(violations) => Some(violations),
            _ => None,
        };
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: label.to_owned(),
            message,
            path: self.path,
            validation_errors,
        };
        (status, body)
    }

    fn log(&self) {
        let (status, label) = self.fault.status_and_label();
        let path = self.path.as_deref().unwrap_or("<unknown>");
        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                path,
                cause = self.cause.as_deref().unwrap_or("none"),
                "{label}: {}",
                self.fault.message()
            );
        } else {
            warn!(status = status.as_u16(), path, "{label}: {}", self.fault.message());
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        self.log();
        let (status, body) = self.into_body();
        (status, Json(body)).into_response()
    }
}

/// Renders a caught panic as a generic internal error.
///
/// The request path is not available once a handler has panicked.
#[must_use]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "request handler panicked");
    let (status, body) = ApiErrorResponse::new(ApiFault::Unexpected, None).into_body();
    (status, Json(body)).into_response()
}
