use api::routes::routes;
use axum::Router;
use serde_json::Value;
use util::state::AppState;

/// Builds a fresh application over an isolated in-memory database with the
/// schema migrated.
pub async fn make_test_app() -> (Router, AppState) {
    let db = db::test_utils::setup_test_db().await;
    let app_state = AppState::new(db);
    let app = Router::new().nest("/api", routes(app_state.clone()));
    (app, app_state)
}

pub async fn get_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
