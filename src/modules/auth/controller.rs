use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (user, token) = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(LoginResponse {
        message: "User logged in successfully".to_string(),
        user,
        token,
    }))
}
