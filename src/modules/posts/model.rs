//! Post entity and post-management DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::User;
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::serde::deserialize_empty_string_as_none;

/// A post, owned by exactly one user.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A post joined with its owning user, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostWithUser {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user: User,
}

/// Flat row shape for the posts-join-users query; column aliases match the
/// `user_` prefixed fields.
#[derive(Debug, FromRow)]
pub struct PostUserRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_member_code: String,
    pub user_created_at: chrono::DateTime<chrono::Utc>,
    pub user_updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PostUserRow> for PostWithUser {
    fn from(row: PostUserRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: User {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
                member_code: row.user_member_code,
                created_at: row.user_created_at,
                updated_at: row.user_updated_at,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "The title field is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "The content field is required"))]
    pub content: String,
}

/// Partial update: absent fields keep their current values.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    #[validate(length(min = 1, message = "The title field is required"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    #[validate(length(min = 1, message = "The content field is required"))]
    pub content: Option<String>,
}

/// Query parameters for the post list: `q` is matched as a case-insensitive
/// substring against title and content.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostFilterParams {
    pub q: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl PostFilterParams {
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub message: String,
    pub data: Post,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedPostsResponse {
    pub message: String,
    pub data: Vec<PostWithUser>,
    pub pagination: PaginationMeta,
}
