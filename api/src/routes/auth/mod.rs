pub mod post;

use axum::{Router, routing::post as http_post};
use util::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", http_post(post::login))
}
