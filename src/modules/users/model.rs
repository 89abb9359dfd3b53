//! User entity and user-management DTOs.
//!
//! [`User`] is the wire representation: the stored bcrypt hash lives only in
//! query-local structs inside the services and is never serialized.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::utils::serde::deserialize_empty_string_as_none;

/// A member of the club.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub member_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for the administrative create-user endpoint. Shares the registration
/// contract: every field required, password confirmed and at least 8 chars.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "The name field is required"))]
    pub name: String,
    #[validate(email(message = "The email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "The password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(
        other = "password",
        message = "The password confirmation does not match"
    ))]
    pub password_confirmation: String,
    #[validate(length(min = 1, message = "The member code field is required"))]
    pub member_code: String,
}

/// DTO for updating a user. `password` is optional: when absent or empty the
/// stored hash is left untouched; when present it must be confirmed and is
/// re-hashed.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "The name field is required"))]
    pub name: String,
    #[validate(email(message = "The email must be a valid email address"))]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    #[validate(length(min = 8, message = "The password must be at least 8 characters"))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_empty_string_as_none")]
    #[validate(must_match(
        other = "password",
        message = "The password confirmation does not match"
    ))]
    pub password_confirmation: Option<String>,
    #[validate(length(min = 1, message = "The member code field is required"))]
    pub member_code: String,
}

/// Query parameters for the user list: `q` is matched as a case-insensitive
/// substring against name, email, and member code.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserFilterParams {
    pub q: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl UserFilterParams {
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub message: String,
    pub data: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub message: String,
    pub data: Vec<User>,
    pub pagination: PaginationMeta,
}
