use crate::auth::claims::AuthUser;
use crate::auth::extractors::ClientIp;
use crate::response::ApiResponse;
use crate::routes::common::{UserResponse, format_validation_errors};
use crate::services::audit;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::{Model as UserModel, Role};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    pub phone: Option<String>,

    pub role: Role,

    pub is_active: Option<bool>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub password_confirm: String,
}

/// POST /api/users
///
/// Create a new user. Requires admin privileges.
///
/// ### Request Body
/// ```json
/// {
///   "email": "anna@example.com",
///   "full_name": "Anna Smith",
///   "phone": "+27 12 345 6789",
///   "role": "student",
///   "is_active": true,
///   "password": "secret123",
///   "password_confirm": "secret123"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user
/// - `400 Bad Request` - Validation failure or password mismatch
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `409 Conflict` - Email already taken (modulo case)
/// - `500 Internal Server Error` - Database error
pub async fn create_user(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    ClientIp(ip): ClientIp,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    if req.password != req.password_confirm {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error("Passwords do not match")),
        );
    }

    let db = app_state.db();

    match UserModel::create(
        db,
        &req.email,
        &req.full_name,
        req.phone.as_deref(),
        req.role,
        req.is_active.unwrap_or(true),
        &req.password,
    )
    .await
    {
        Ok(user) => {
            audit::record_mutation(
                db,
                claims.sub,
                "create_user",
                "users",
                user.id,
                None::<&UserModel>,
                Some(&user),
                ip,
            )
            .await;

            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    UserResponse::from(user),
                    "User created successfully",
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
