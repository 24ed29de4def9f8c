use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::{
    group::{Column as GroupColumn, Entity as GroupEntity, Model as GroupModel},
    user::Entity as UserEntity,
};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct GroupListItem {
    pub id: i64,
    pub group_name: String,
    pub curator_name: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub enrollment_count: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct GroupsListResponse {
    pub groups: Vec<GroupListItem>,
    pub total: usize,
}

/// GET /api/groups
///
/// List all study groups ordered by name, each with its curator and the
/// number of enrollments linked to it. Requires admin privileges.
///
/// ### Responses
/// - `200 OK` with the group list
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `500 Internal Server Error` - Database error
pub async fn list_groups(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    let groups = match GroupEntity::find()
        .order_by_asc(GroupColumn::GroupName)
        .all(db)
        .await
    {
        Ok(groups) => groups,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<GroupsListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut items = Vec::with_capacity(groups.len());
    for group in groups {
        let curator_name = match group.curator_id {
            Some(curator_id) => match UserEntity::find_by_id(curator_id).one(db).await {
                Ok(user) => user.map(|u| u.full_name),
                Err(e) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<GroupsListResponse>::error(format!(
                            "Database error: {}",
                            e
                        ))),
                    );
                }
            },
            None => None,
        };

        let enrollment_count = match GroupModel::enrollment_count(db, group.id).await {
            Ok(count) => count,
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<GroupsListResponse>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        };

        items.push(GroupListItem {
            id: group.id,
            group_name: group.group_name,
            curator_name,
            description: group.description,
            created_at: group.created_at.to_rfc3339(),
            enrollment_count,
        });
    }

    let total = items.len();
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            GroupsListResponse { groups: items, total },
            "Groups retrieved successfully",
        )),
    )
}
