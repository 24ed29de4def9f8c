use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::{Model as UserModel, Role};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/login
///
/// Authenticate with email and password.
///
/// ### Request Body
/// ```json
/// { "email": "admin@example.com", "password": "secret123" }
/// ```
///
/// ### Responses
/// - `200 OK` with the user payload, a bearer token and its expiry.
/// - `400 Bad Request` on validation failure.
/// - `401 Unauthorized` on unknown email, wrong password, or a deactivated
///   account. The three cases are indistinguishable in the response.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = app_state.db();

    let user = match UserModel::verify_credentials(db, &req.email, &req.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<LoginResponse>::error("Invalid email or password")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LoginResponse>::error(format!("Database error: {}", e))),
            );
        }
    };

    if let Err(e) = user.touch_last_login(db).await {
        tracing::warn!(error = %e, user_id = user.id, "Failed to update last_login");
    }

    let (token, expires_at) = generate_jwt(user.id, user.role);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LoginResponse {
                id: user.id,
                email: user.email,
                full_name: user.full_name,
                role: user.role,
                token,
                expires_at,
            },
            "Login successful",
        )),
    )
}
