use crate::auth::claims::AuthUser;
use crate::auth::extractors::ClientIp;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::services::audit;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{group::Model as GroupModel, user::Entity as UserEntity};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, message = "Group name is required"))]
    pub group_name: String,

    pub curator_id: Option<i64>,

    pub description: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct GroupResponse {
    pub id: i64,
    pub group_name: String,
    pub curator_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: String,
}

/// POST /api/groups
///
/// Create a study group. Requires admin privileges. The optional curator must
/// reference an existing user; group names are unique.
///
/// ### Responses
/// - `201 Created` with the new group
/// - `400 Bad Request` - Validation failure or unknown curator
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `409 Conflict` - Group name already taken
/// - `500 Internal Server Error` - Database error
pub async fn create_group(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    ClientIp(ip): ClientIp,
    Json(req): Json<CreateGroupRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<GroupResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = app_state.db();

    if let Some(curator_id) = req.curator_id {
        match UserEntity::find_by_id(curator_id).one(db).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<GroupResponse>::error("Curator does not exist")),
                );
            }
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<GroupResponse>::error(format!("Database error: {}", e))),
                );
            }
        }
    }

    match GroupModel::create(db, &req.group_name, req.curator_id, req.description.as_deref()).await
    {
        Ok(group) => {
            audit::record_mutation(
                db,
                claims.sub,
                "create_group",
                "groups",
                group.id,
                None::<&GroupModel>,
                Some(&group),
                ip,
            )
            .await;

            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    GroupResponse {
                        id: group.id,
                        group_name: group.group_name,
                        curator_id: group.curator_id,
                        description: group.description,
                        created_at: group.created_at.to_rfc3339(),
                    },
                    "Group created successfully",
                )),
            )
        }
        Err(e) if e.to_string().contains("UNIQUE") => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<GroupResponse>::error(
                "A group with this name already exists",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<GroupResponse>::error(format!("Database error: {}", e))),
        ),
    }
}
