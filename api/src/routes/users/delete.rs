use crate::auth::claims::AuthUser;
use crate::auth::extractors::ClientIp;
use crate::response::ApiResponse;
use crate::services::audit;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::{Entity as UserEntity, Model as UserModel};
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use crate::auth::guards::Empty;

/// DELETE /api/users/{user_id}
///
/// Hard-delete a user. Requires admin privileges. Owned rows cascade per the
/// schema (courses, enrollments, quiz results); weak references (group
/// curator, audit actor) are nulled instead.
///
/// ### Responses
/// - `200 OK` on success
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `404 Not Found` - No such user
/// - `500 Internal Server Error` - Database error
pub async fn delete_user(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    ClientIp(ip): ClientIp,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let user = match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
            );
        }
    };

    let snapshot = user.clone();
    match user.delete(db).await {
        Ok(_) => {
            audit::record_mutation(
                db,
                claims.sub,
                "delete_user",
                "users",
                user_id,
                Some(&snapshot),
                None::<&UserModel>,
                ip,
            )
            .await;

            (
                StatusCode::OK,
                Json(ApiResponse::success(Empty, "User deleted successfully")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
