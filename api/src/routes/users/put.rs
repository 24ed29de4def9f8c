use crate::auth::claims::AuthUser;
use crate::auth::extractors::ClientIp;
use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, format_validation_errors};
use crate::services::audit;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::{self, Entity as UserEntity, Role};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct EditUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    pub phone: Option<String>,

    pub role: Role,

    pub is_active: bool,

    /// Optional password change. When present and non-empty,
    /// `password_confirm` must match and both must be at least 6 characters.
    pub password: Option<String>,

    pub password_confirm: Option<String>,
}

/// PUT /api/users/{user_id}
///
/// Update a user's profile, and optionally their password. Requires admin
/// privileges.
///
/// All validation runs before anything is written: if the password change is
/// requested and fails validation, no profile field is committed and the
/// stored hash is left untouched.
///
/// ### Responses
/// - `200 OK` with the updated user
/// - `400 Bad Request` - Validation failure, password mismatch, or short
///   password
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `404 Not Found` - No such user
/// - `409 Conflict` - Email already taken by another user
/// - `500 Internal Server Error` - Database error
pub async fn edit_user(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    ClientIp(ip): ClientIp,
    Path(user_id): Path<i64>,
    Json(req): Json<EditUserRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    // Validate the optional password change up front, before touching any
    // field.
    let new_password = match req.password.as_deref() {
        Some(password) if !password.is_empty() => {
            if req.password_confirm.as_deref() != Some(password) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<UserResponse>::error("Passwords do not match")),
                );
            }
            // Character count, matching the create-path validation.
            if password.chars().count() < 6 {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<UserResponse>::error(
                        "Password must be at least 6 characters",
                    )),
                );
            }
            Some(password)
        }
        _ => None,
    };

    let db = app_state.db();

    let existing = match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<UserResponse>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserResponse>::error(format!("Database error: {}", e))),
            );
        }
    };

    let mut active = user::ActiveModel {
        id: Set(user_id),
        email: Set(user::normalize_email(&req.email)),
        full_name: Set(req.full_name.clone()),
        phone: Set(req.phone.clone()),
        role: Set(req.role),
        is_active: Set(req.is_active),
        ..Default::default()
    };

    if let Some(password) = new_password {
        match user::hash_password(password) {
            Ok(hash) => active.password_hash = Set(hash),
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<UserResponse>::error(format!("Database error: {}", e))),
                );
            }
        }
    }

    match active.update(db).await {
        Ok(updated) => {
            audit::record_mutation(
                db,
                claims.sub,
                "edit_user",
                "users",
                user_id,
                Some(&existing),
                Some(&updated),
                ip,
            )
            .await;

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserResponse::from(updated),
                    "User updated successfully",
                )),
            )
        }
        Err(e) if e.to_string().contains("UNIQUE") => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<UserResponse>::error(
                "A user with this email already exists",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!("Database error: {}", e))),
        ),
    }
}
