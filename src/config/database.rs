//! Database configuration and connection pool initialization.
//!
//! Reads the PostgreSQL connection string from the `DATABASE_URL`
//! environment variable and builds the `sqlx` connection pool shared by all
//! request handlers.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// The returned [`PgPool`] is cheaply cloneable and is stored in the
/// application state for use in request handlers.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection cannot be
/// established. This runs once at startup, before the server accepts
/// traffic.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
