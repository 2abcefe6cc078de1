//! Field constraints applied to task request bodies before they reach the
//! service.
//!
//! Validation runs on the raw JSON object so that a rejected value can be
//! echoed back exactly as it was received, including values of the wrong
//! type and status names outside the enumeration.

use crate::task::{
    domain::{Task, TaskStatus},
    dto::TaskRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const TITLE_REQUIRED: &str = "Title is required";
const TITLE_NOT_STRING: &str = "Title must be a string";
const TITLE_LENGTH: &str = "Title must be between 1 and 100 characters";
const DESCRIPTION_NOT_STRING: &str = "Description must be a string";
const DESCRIPTION_LENGTH: &str = "Description cannot exceed 500 characters";
const STATUS_REQUIRED: &str = "Status is required";
const STATUS_UNKNOWN: &str = "Status must be one of TODO, IN_PROGRESS, DONE";

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Name of the offending field.
    pub field: String,
    /// Description of the violated constraint.
    pub message: String,
    /// The value that was received, or `null` when the field was missing.
    pub rejected_value: Value,
}

impl FieldViolation {
    /// Creates a violation record.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>, rejected_value: Value) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rejected_value,
        }
    }
}

/// Every violation found in one request body, in field order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationFailure(pub Vec<FieldViolation>);

/// Validates a task request body and converts it into a [`TaskRequest`].
///
/// Title and status are required; description is optional. Unknown fields
/// are ignored.
///
/// # Errors
///
/// Returns [`ValidationFailure`] listing every violated constraint.
pub fn validate_task_request(body: &Map<String, Value>) -> Result<TaskRequest, ValidationFailure> {
    let mut violations = Vec::new();

    let title = validate_title(field(body, "title"), &mut violations);
    let description = validate_description(field(body, "description"), &mut violations);
    let status = validate_status(field(body, "status"), &mut violations);

    if !violations.is_empty() {
        return Err(ValidationFailure(violations));
    }

    Ok(TaskRequest {
        title,
        description,
        status,
    })
}

fn field<'a>(body: &'a Map<String, Value>, name: &str) -> &'a Value {
    body.get(name).unwrap_or(&Value::Null)
}

fn validate_title(value: &Value, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match value {
        Value::Null => {
            violations.push(FieldViolation::new("title", TITLE_REQUIRED, Value::Null));
            None
        }
        Value::String(title) => {
            let length = title.chars().count();
            if title.trim().is_empty() {
                violations.push(FieldViolation::new("title", TITLE_REQUIRED, value.clone()));
            }
            if length == 0 || length > Task::MAX_TITLE_CHARS {
                violations.push(FieldViolation::new("title", TITLE_LENGTH, value.clone()));
            }
            Some(title.clone())
        }
        _ => {
            violations.push(FieldViolation::new("title", TITLE_NOT_STRING, value.clone()));
            None
        }
    }
}

fn validate_description(value: &Value, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(description) => {
            if description.chars().count() > Task::MAX_DESCRIPTION_CHARS {
                violations.push(FieldViolation::new(
                    "description",
                    DESCRIPTION_LENGTH,
                    value.clone(),
                ));
            }
            Some(description.clone())
        }
        _ => {
            violations.push(FieldViolation::new(
                "description",
                DESCRIPTION_NOT_STRING,
                value.clone(),
            ));
            None
        }
    }
}

fn validate_status(value: &Value, violations: &mut Vec<FieldViolation>) -> Option<TaskStatus> {
    if value.is_null() {
        violations.push(FieldViolation::new("status", STATUS_REQUIRED, Value::Null));
        return None;
    }

    let parsed = value
        .as_str()
        .and_then(|name| TaskStatus::try_from(name).ok());
    if parsed.is_none() {
        violations.push(FieldViolation::new("status", STATUS_UNKNOWN, value.clone()));
    }
    parsed
}
