use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
};
use crate::modules::posts::model::{
    CreatePostRequest, PaginatedPostsResponse, Post, PostResponse, PostWithUser, UpdatePostRequest,
};
use crate::modules::users::model::{
    CreateUserRequest, PaginatedUsersResponse, UpdateUserRequest, User, UserResponse,
};
use crate::utils::pagination::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::get_posts,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
    ),
    components(
        schemas(
            User,
            Post,
            PostWithUser,
            RegisterRequest,
            LoginRequest,
            RegisterResponse,
            LoginResponse,
            MessageResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            PaginatedUsersResponse,
            CreatePostRequest,
            UpdatePostRequest,
            PostResponse,
            PaginatedPostsResponse,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "User management endpoints"),
        (name = "Posts", description = "Post management endpoints")
    ),
    info(
        title = "Clubhouse API",
        version = "0.1.0",
        description = "A members club REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
