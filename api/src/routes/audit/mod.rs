pub mod get;

use axum::{Router, routing::get as http_get};
use util::state::AppState;

pub fn audit_routes() -> Router<AppState> {
    Router::new().route("/", http_get(get::list_audit_logs))
}
