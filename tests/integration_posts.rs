mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_post, create_test_user, generate_unique_email, generate_unique_member_code,
    get_auth_token, response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_authenticated(pool: &PgPool) -> (axum::Router, common::TestUser, String) {
    let email = generate_unique_email();
    let user = create_test_user(
        pool,
        "Post Author",
        &email,
        "password123",
        &generate_unique_member_code(),
    )
    .await;
    let app = setup_test_app(pool.clone());
    let token = get_auth_token(app.clone(), &email, "password123").await;
    (app, user, token)
}

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_post_owned_by_requester(pool: PgPool) {
    let (app, user, token) = setup_authenticated(&pool).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/posts",
            &token,
            json!({
                "title": "Sample Post",
                "content": "This is a sample post content."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Post created successfully");
    assert_eq!(body["data"]["title"], "Sample Post");
    assert_eq!(body["data"]["content"], "This is a sample post content.");
    assert_eq!(body["data"]["user_id"], user.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_post_requires_fields(pool: PgPool) {
    let (app, _user, token) = setup_authenticated(&pool).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/posts",
            &token,
            json!({
                "title": "",
                "content": ""
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    let errors = body["errors"].as_object().unwrap();
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("content"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_own_post(pool: PgPool) {
    let (app, user, token) = setup_authenticated(&pool).await;
    let post_id = create_test_post(&pool, user.id, "Original Title", "Original Content").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/posts/{}", post_id),
            &token,
            json!({
                "title": "Updated Post Title",
                "content": "Updated content."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["data"]["title"], "Updated Post Title");
    assert_eq!(body["data"]["content"], "Updated content.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update_keeps_other_field(pool: PgPool) {
    let (app, user, token) = setup_authenticated(&pool).await;
    let post_id = create_test_post(&pool, user.id, "Original Title", "Original Content").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/posts/{}", post_id),
            &token,
            json!({
                "title": "Only Title Changed"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["title"], "Only Title Changed");
    assert_eq!(body["data"]["content"], "Original Content");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_other_users_post_is_not_found(pool: PgPool) {
    let (app, _user, token) = setup_authenticated(&pool).await;
    let other = create_test_user(
        &pool,
        "Other Author",
        &generate_unique_email(),
        "password123",
        &generate_unique_member_code(),
    )
    .await;
    let post_id = create_test_post(&pool, other.id, "Someone else's", "Hands off").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/posts/{}", post_id),
            &token,
            json!({
                "title": "Hijacked",
                "content": "Nope"
            }),
        ))
        .await
        .unwrap();

    // Ownership failures are a 404, not a 403.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Post not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_own_post(pool: PgPool) {
    let (app, user, token) = setup_authenticated(&pool).await;
    let post_id = create_test_post(&pool, user.id, "Post to be deleted", "Goodbye").await;

    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/posts/{}", post_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Post deleted successfully");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_other_users_post_is_not_found(pool: PgPool) {
    let (app, _user, token) = setup_authenticated(&pool).await;
    let other = create_test_user(
        &pool,
        "Other Author",
        &generate_unique_email(),
        "password123",
        &generate_unique_member_code(),
    )
    .await;
    let post_id = create_test_post(&pool, other.id, "Protected", "Still here").await;

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/posts/{}", post_id),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unknown_post(pool: PgPool) {
    let (app, _user, token) = setup_authenticated(&pool).await;

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/posts/{}", Uuid::new_v4()),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_index_lists_all_posts_with_owner(pool: PgPool) {
    let (app, user, token) = setup_authenticated(&pool).await;
    let other = create_test_user(
        &pool,
        "Other Author",
        &generate_unique_email(),
        "password123",
        &generate_unique_member_code(),
    )
    .await;
    create_test_post(&pool, user.id, "First Post", "Content of first post").await;
    create_test_post(&pool, other.id, "Second Post", "Content of second post").await;

    let response = app
        .oneshot(empty_request("GET", "/api/posts?page=1&limit=2", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Posts retrieved successfully");
    let data = body["data"].as_array().unwrap();
    // The list is global, not scoped to the requester.
    assert_eq!(data.len(), 2);
    for post in data {
        assert_eq!(post["user"]["id"], post["user_id"]);
        assert!(post["user"]["name"].is_string());
        assert!(post["user"]["password"].is_null());
    }
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["total_page"], 1);
    assert_eq!(body["pagination"]["per_page"], 2);
    assert_eq!(body["pagination"]["total_data"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_index_search_title_or_content(pool: PgPool) {
    let (app, user, token) = setup_authenticated(&pool).await;
    create_test_post(&pool, user.id, "Gardening tips", "Water your plants").await;
    create_test_post(&pool, user.id, "Cooking", "A secret gardening trick in the kitchen").await;
    create_test_post(&pool, user.id, "Unrelated", "Nothing to see").await;

    let response = app
        .oneshot(empty_request("GET", "/api/posts?q=GARDENING", &token))
        .await
        .unwrap();

    let body = response_json(response).await;
    // Matches in title and in content, case-insensitively.
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total_data"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_posts_require_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/posts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
