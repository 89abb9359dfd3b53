use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::MessageResponse;
use crate::modules::users::model::{
    CreateUserRequest, PaginatedUsersResponse, UpdateUserRequest, UserFilterParams, UserResponse,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a new user (administrative; does not log the user in)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully".to_string(),
            data: user,
        }),
    ))
}

/// List users with pagination and substring search
#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, defaults to 10"),
        ("q" = Option<String>, Query, description = "Substring filter on name, email, or member code")
    ),
    responses(
        (status = 200, description = "Paginated list of users", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    filters: Result<Query<UserFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let Query(filters) =
        filters.map_err(|e| AppError::bad_request(format!("Invalid query parameters: {}", e)))?;

    let (users, pagination) = UserService::get_users(&state.db, filters).await?;
    Ok(Json(PaginatedUsersResponse {
        message: "Users fetched successfully".to_string(),
        data: users,
        pagination,
    }))
}

/// Fetch a single user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user.id = %id))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(UserResponse {
        message: "User fetched successfully".to_string(),
        data: user,
    }))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user.id = %id))]
pub async fn update_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        data: user,
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all, fields(user.id = %id))]
pub async fn delete_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
