use axum::body::Body;
use axum::http::Request;
use clubhouse::config::cors::CorsConfig;
use clubhouse::config::jwt::JwtConfig;
use clubhouse::router::init_router;
use clubhouse::state::AppState;
use clubhouse::utils::password::hash_password;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::default(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub member_code: String,
}

/// Inserts a user directly, bypassing the API, with a bcrypt-hashed password.
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    member_code: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, member_code, password)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(member_code)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        member_code: member_code.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_post(pool: &PgPool, user_id: Uuid, title: &str, content: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO posts (title, content, user_id)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(title)
    .bind(content)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Logs in through the API and returns the bearer token.
#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["token"].as_str().unwrap().to_string()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_member_code() -> String {
    format!("MEM-{}", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
