use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::modules::posts::model::{
    CreatePostRequest, Post, PostFilterParams, PostUserRow, PostWithUser, UpdatePostRequest,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const POST_COLUMNS: &str = "id, title, content, user_id, created_at, updated_at";

pub struct PostService;

impl PostService {
    #[instrument(skip(db, dto), fields(user.id = %user_id))]
    pub async fn create_post(
        db: &PgPool,
        user_id: Uuid,
        dto: CreatePostRequest,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, content, user_id)
             VALUES ($1, $2, $3)
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(post)
    }

    /// Lists every post regardless of owner, each joined with its user.
    #[instrument(skip(db, filters))]
    pub async fn get_posts(
        db: &PgPool,
        filters: PostFilterParams,
    ) -> Result<(Vec<PostWithUser>, PaginationMeta), AppError> {
        let page = filters.pagination.page();
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let search = filters.search().map(|q| format!("%{}%", q));

        let mut where_clause = String::new();
        if search.is_some() {
            where_clause.push_str(" WHERE (p.title ILIKE $1 OR p.content ILIKE $1)");
        }

        let count_query = format!("SELECT COUNT(*) FROM posts p{where_clause}");
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(term) = &search {
            count_sql = count_sql.bind(term);
        }
        let total = count_sql.fetch_one(db).await?;

        let data_query = format!(
            "SELECT p.id, p.title, p.content, p.user_id, p.created_at, p.updated_at,
                    u.name AS user_name, u.email AS user_email,
                    u.member_code AS user_member_code,
                    u.created_at AS user_created_at, u.updated_at AS user_updated_at
             FROM posts p
             JOIN users u ON u.id = p.user_id{where_clause}
             ORDER BY p.created_at DESC LIMIT {limit} OFFSET {offset}"
        );
        let mut data_sql = sqlx::query_as::<_, PostUserRow>(&data_query);
        if let Some(term) = &search {
            data_sql = data_sql.bind(term);
        }
        let posts = data_sql
            .fetch_all(db)
            .await?
            .into_iter()
            .map(PostWithUser::from)
            .collect::<Vec<_>>();

        debug!(total = %total, returned = %posts.len(), "Posts fetched");

        Ok((posts, PaginationMeta::new(page, limit, total)))
    }

    /// Updates a post only when it belongs to `user_id`. A post owned by
    /// someone else is indistinguishable from a missing one.
    #[instrument(skip(db, dto), fields(post.id = %id, user.id = %user_id))]
    pub async fn update_post(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        dto: UpdatePostRequest,
    ) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts
             SET title = COALESCE($3, title),
                 content = COALESCE($4, content),
                 updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(dto.title.as_deref())
        .bind(dto.content.as_deref())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Post not found"))
    }

    #[instrument(skip(db), fields(post.id = %id, user.id = %user_id))]
    pub async fn delete_post(db: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Post not found"));
        }

        Ok(())
    }
}
