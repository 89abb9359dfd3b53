use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::modules::users::model::{CreateUserRequest, UpdateUserRequest, User, UserFilterParams};
use crate::utils::errors::{AppError, FieldErrors};
use crate::utils::pagination::PaginationMeta;
use crate::utils::password::hash_password;

const USER_COLUMNS: &str = "id, name, email, member_code, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Pre-checks `email` and `member_code` uniqueness so both offending
    /// fields show up in one 422. The DB constraints stay authoritative for
    /// races; see [`Self::map_unique_violation`].
    async fn check_unique_fields(
        db: &PgPool,
        email: &str,
        member_code: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(db)
        .await?;

        let member_code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE member_code = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(member_code)
        .bind(exclude_id)
        .fetch_one(db)
        .await?;

        let mut errors = FieldErrors::new();
        if email_taken {
            errors.insert(
                "email".to_string(),
                vec!["The email has already been taken".to_string()],
            );
        }
        if member_code_taken {
            errors.insert(
                "member_code".to_string(),
                vec!["The member code has already been taken".to_string()],
            );
        }

        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        Ok(())
    }

    /// A concurrent duplicate that slips past the pre-check hits the unique
    /// constraint; surface it as the same 422 instead of a 500.
    fn map_unique_violation(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            let constraint = db_err.constraint().unwrap_or_default();
            if constraint.contains("member_code") {
                return AppError::conflict(
                    "member_code",
                    "The member code has already been taken",
                );
            }
            return AppError::conflict("email", "The email has already been taken");
        }
        AppError::from(e)
    }

    #[instrument(skip(db, dto), fields(user.email = %dto.email))]
    pub async fn create_user(db: &PgPool, dto: CreateUserRequest) -> Result<User, AppError> {
        Self::check_unique_fields(db, &dto.email, &dto.member_code, None).await?;

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, member_code, password)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&dto.member_code)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(Self::map_unique_violation)?;

        Ok(user)
    }

    #[instrument(skip(db, filters))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<(Vec<User>, PaginationMeta), AppError> {
        let page = filters.pagination.page();
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let search = filters.search().map(|q| format!("%{}%", q));

        let mut where_clause = String::new();
        if search.is_some() {
            where_clause
                .push_str(" WHERE (name ILIKE $1 OR email ILIKE $1 OR member_code ILIKE $1)");
        }

        let count_query = format!("SELECT COUNT(*) FROM users{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(term) = &search {
            count_sql = count_sql.bind(term);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT {USER_COLUMNS} FROM users{where_clause}
             ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, User>(&data_query);
        if let Some(term) = &search {
            data_sql = data_sql.bind(term);
        }
        let users = data_sql.fetch_all(db).await?;

        debug!(total = %total, returned = %users.len(), "Users fetched");

        Ok((users, PaginationMeta::new(page, limit, total)))
    }

    #[instrument(skip(db), fields(user.id = %id))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Applies a full field replacement. The password is re-hashed only when
    /// the request carries one; an omitted password leaves the stored hash
    /// unchanged.
    #[instrument(skip(db, dto), fields(user.id = %id))]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserRequest,
    ) -> Result<User, AppError> {
        Self::check_unique_fields(db, &dto.email, &dto.member_code, Some(id)).await?;

        let user = match dto.password.as_deref() {
            Some(password) => {
                let hashed_password = hash_password(password)?;
                sqlx::query_as::<_, User>(&format!(
                    "UPDATE users
                     SET name = $2, email = $3, member_code = $4, password = $5, updated_at = NOW()
                     WHERE id = $1
                     RETURNING {USER_COLUMNS}"
                ))
                .bind(id)
                .bind(&dto.name)
                .bind(&dto.email)
                .bind(&dto.member_code)
                .bind(&hashed_password)
                .fetch_optional(db)
                .await
                .map_err(Self::map_unique_violation)?
            }
            None => {
                sqlx::query_as::<_, User>(&format!(
                    "UPDATE users
                     SET name = $2, email = $3, member_code = $4, updated_at = NOW()
                     WHERE id = $1
                     RETURNING {USER_COLUMNS}"
                ))
                .bind(id)
                .bind(&dto.name)
                .bind(&dto.email)
                .bind(&dto.member_code)
                .fetch_optional(db)
                .await
                .map_err(Self::map_unique_violation)?
            }
        };

        user.ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db), fields(user.id = %id))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }
}
