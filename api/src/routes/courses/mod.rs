pub mod get;
pub mod post;

use axum::{Router, routing::get as http_get};
use util::state::AppState;

pub fn courses_routes() -> Router<AppState> {
    Router::new()
        .route("/", http_get(get::list_courses).post(post::create_course))
        .route("/{course_id}", http_get(get::get_course))
}
