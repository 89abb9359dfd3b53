use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Field name → human-readable messages, as rendered in 422 bodies.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum AppError {
    /// Request data failed validation. Rendered as 422 with a field error map.
    Validation(FieldErrors),
    /// A unique constraint would be violated. Rendered like a validation
    /// failure on the offending field so callers see 422, not 500.
    Conflict { field: String, message: String },
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }

    pub fn conflict(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": "The given data was invalid",
                    "errors": errors,
                })),
            )
                .into_response(),
            AppError::Conflict { field, message } => {
                let mut errors = FieldErrors::new();
                errors.insert(field, vec![message]);
                AppError::Validation(errors).into_response()
            }
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message })),
            )
                .into_response(),
            AppError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": message })),
            )
                .into_response(),
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            AppError::Internal(err) => {
                error!(error = %err, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
