pub mod get;
pub mod post;

use axum::{Router, routing::get as http_get};
use util::state::AppState;

pub fn groups_routes() -> Router<AppState> {
    Router::new().route("/", http_get(get::list_groups).post(post::create_group))
}
