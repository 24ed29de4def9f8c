use crate::response::ApiResponse;
use crate::routes::common::UserResponse;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::{Column as UserColumn, Entity as UserEntity, Role};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// GET /api/users
///
/// List users ordered by full name. Requires admin privileges.
///
/// ### Query Parameters
/// - `role` (optional): Exact role match (`student`, `teacher`, `admin`)
/// - `status` (optional): `active` or `inactive`
/// - `search` (optional): Case-insensitive substring match against full name
///   OR email
///
/// Filters combine conjunctively.
///
/// ### Responses
/// - `200 OK` with the filtered user list
/// - `400 Bad Request` - Unknown `role` or `status` value
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `403 Forbidden` - Authenticated but not an admin
/// - `500 Internal Server Error` - Database error
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut condition = Condition::all();

    if let Some(role) = &query.role {
        let Ok(role) = Role::from_str(role) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UsersListResponse>::error(format!(
                    "Unknown role '{}'",
                    role
                ))),
            );
        };
        condition = condition.add(UserColumn::Role.eq(role));
    }

    if let Some(status) = &query.status {
        let is_active = match status.as_str() {
            "active" => true,
            "inactive" => false,
            other => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<UsersListResponse>::error(format!(
                        "Unknown status '{}'",
                        other
                    ))),
                );
            }
        };
        condition = condition.add(UserColumn::IsActive.eq(is_active));
    }

    if let Some(search) = &query.search {
        condition = condition.add(
            Condition::any()
                .add(UserColumn::FullName.contains(search))
                .add(UserColumn::Email.contains(search)),
        );
    }

    match UserEntity::find()
        .filter(condition)
        .order_by_asc(UserColumn::FullName)
        .all(db)
        .await
    {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            let total = users.len();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UsersListResponse { users, total },
                    "Users retrieved successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UsersListResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
