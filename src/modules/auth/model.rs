use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;

/// JWT claims carried by the access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Registration request. Same contract as the administrative create-user
/// endpoint.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
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

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "The email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "The password field is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
