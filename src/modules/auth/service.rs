use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{CreateUserRequest, User};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, RegisterRequest};

impl From<RegisterRequest> for CreateUserRequest {
    fn from(dto: RegisterRequest) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            password_confirmation: dto.password_confirmation,
            member_code: dto.member_code,
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Registration shares the create-user contract; it only differs in the
    /// response shape and in being public.
    #[instrument(skip_all, fields(user.email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        UserService::create_user(db, dto.into()).await
    }

    /// Verifies credentials and issues an access token. Unknown email and
    /// wrong password produce the identical 401 so the response does not
    /// reveal which one failed.
    #[instrument(skip_all, fields(user.email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(User, String), AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            name: String,
            email: String,
            member_code: String,
            password: String,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let user_with_password = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, member_code, password, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Email or password is incorrect"))?;

        let is_valid = verify_password(&dto.password, &user_with_password.password)?;
        if !is_valid {
            return Err(AppError::unauthorized("Email or password is incorrect"));
        }

        let token = create_access_token(
            user_with_password.id,
            &user_with_password.email,
            jwt_config,
        )?;

        let user = User {
            id: user_with_password.id,
            name: user_with_password.name,
            email: user_with_password.email,
            member_code: user_with_password.member_code,
            created_at: user_with_password.created_at,
            updated_at: user_with_password.updated_at,
        };

        Ok((user, token))
    }
}
