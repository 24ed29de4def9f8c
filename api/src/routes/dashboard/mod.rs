pub mod get;

use axum::{Router, routing::get as http_get};
use util::state::AppState;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", http_get(get::dashboard))
}
