pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{delete as http_delete, get as http_get},
};
use util::state::AppState;

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", http_get(get::list_users).post(post::create_user))
        .route(
            "/{user_id}",
            http_delete(delete::delete_user).put(put::edit_user),
        )
}
