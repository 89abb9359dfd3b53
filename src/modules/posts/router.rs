use axum::{Router, routing::get, routing::put};

use crate::modules::posts::controller::{create_post, delete_post, get_posts, update_post};
use crate::state::AppState;

pub fn init_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_posts).post(create_post))
        .route("/{id}", put(update_post).delete(delete_post))
}
