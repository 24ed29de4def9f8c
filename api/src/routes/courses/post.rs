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
use chrono::NaiveDate;
use db::models::{
    course::{Model as CourseModel, Status as CourseStatus},
    user::Entity as UserEntity,
};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    pub teacher_id: i64,

    pub status: Option<CourseStatus>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "max_students must be positive"))]
    pub max_students: Option<i32>,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub status: Option<CourseStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_students: Option<i32>,
    pub created_at: String,
}

/// POST /api/courses
///
/// Create a course. Open to teachers and admins. The referenced teacher must
/// exist; status defaults to `draft`.
///
/// ### Responses
/// - `201 Created` with the new course
/// - `400 Bad Request` - Validation failure or unknown teacher
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `500 Internal Server Error` - Database error
pub async fn create_course(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    ClientIp(ip): ClientIp,
    Json(req): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CourseResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = app_state.db();

    match UserEntity::find_by_id(req.teacher_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<CourseResponse>::error("Teacher does not exist")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CourseResponse>::error(format!("Database error: {}", e))),
            );
        }
    }

    match CourseModel::create(
        db,
        &req.title,
        req.description.as_deref(),
        req.teacher_id,
        req.status.unwrap_or(CourseStatus::Draft),
        req.start_date,
        req.end_date,
        req.max_students,
    )
    .await
    {
        Ok(course) => {
            audit::record_mutation(
                db,
                claims.sub,
                "create_course",
                "courses",
                course.id,
                None::<&CourseModel>,
                Some(&course),
                ip,
            )
            .await;

            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    CourseResponse {
                        id: course.id,
                        title: course.title,
                        description: course.description,
                        teacher_id: course.teacher_id,
                        status: Some(course.status),
                        start_date: course.start_date.map(|d| d.to_string()),
                        end_date: course.end_date.map(|d| d.to_string()),
                        max_students: course.max_students,
                        created_at: course.created_at.to_rfc3339(),
                    },
                    "Course created successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CourseResponse>::error(format!("Database error: {}", e))),
        ),
    }
}
