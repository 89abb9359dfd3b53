use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::{AppError, FieldErrors};

fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("The {} field is invalid", field))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// JSON extractor that runs the DTO's validation rules before the handler
/// body executes. Rule failures become a 422 with a field error map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                // A field absent from the body fails deserialization before
                // the validator runs; report it the same way a failed
                // `required` rule would be.
                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    let mut errors = FieldErrors::new();
                    errors.insert(
                        field.to_string(),
                        vec![format!("The {} field is required", field)],
                    );
                    return AppError::validation(errors);
                }

                AppError::bad_request("Invalid request body")
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(collect_field_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}
