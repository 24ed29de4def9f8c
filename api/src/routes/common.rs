use db::models::user::{Model as UserModel, Role};
use serde::Serialize;
use validator::ValidationErrors;

/// Flattens `validator` errors into a single `;`-joined message string for
/// the response envelope.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// User payload shared by the auth, users, and audit endpoints. Never carries
/// the password hash.
#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: String,
    pub last_login: Option<String>,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at.to_rfc3339(),
            last_login: user.last_login.map(|t| t.to_rfc3339()),
        }
    }
}
