use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::MessageResponse;
use crate::modules::posts::model::{
    CreatePostRequest, PaginatedPostsResponse, PostFilterParams, PostResponse, UpdatePostRequest,
};
use crate::modules::posts::service::PostService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Create a post owned by the authenticated user
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = PostResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let user_id = auth_user.user_id()?;
    let post = PostService::create_post(&state.db, user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            message: "Post created successfully".to_string(),
            data: post,
        }),
    ))
}

/// List all posts with their owners, paginated and searchable
#[utoipa::path(
    get,
    path = "/api/posts",
    params(
        ("page" = Option<i64>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, defaults to 10"),
        ("q" = Option<String>, Query, description = "Substring filter on title or content")
    ),
    responses(
        (status = 200, description = "Paginated list of posts", body = PaginatedPostsResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all)]
pub async fn get_posts(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    filters: Result<Query<PostFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedPostsResponse>, AppError> {
    let Query(filters) =
        filters.map_err(|e| AppError::bad_request(format!("Invalid query parameters: {}", e)))?;

    let (posts, pagination) = PostService::get_posts(&state.db, filters).await?;
    Ok(Json(PaginatedPostsResponse {
        message: "Posts retrieved successfully".to_string(),
        data: posts,
        pagination,
    }))
}

/// Update a post owned by the authenticated user
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated successfully", body = PostResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "Post not found or owned by another user"),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all, fields(post.id = %id))]
pub async fn update_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let post = PostService::update_post(&state.db, user_id, id, dto).await?;
    Ok(Json(PostResponse {
        message: "Post updated successfully".to_string(),
        data: post,
    }))
}

/// Delete a post owned by the authenticated user
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized - missing or invalid token"),
        (status = 404, description = "Post not found or owned by another user"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip_all, fields(post.id = %id))]
pub async fn delete_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    PostService::delete_post(&state.db, user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
