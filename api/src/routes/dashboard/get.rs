use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity, Model as CourseModel, Status as CourseStatus},
    enrollment::{Column as EnrollmentColumn, Entity as EnrollmentEntity, Status as EnrollmentStatus},
    quiz_result::Model as QuizResultModel,
    user::{Column as UserColumn, Entity as UserEntity, Role},
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub active_courses: u64,
    pub total_enrollments: u64,
}

#[derive(Debug, Serialize)]
pub struct RecentEnrollment {
    pub id: i64,
    pub student_name: String,
    pub student_email: String,
    pub course_title: String,
    pub enrolled_at: String,
}

#[derive(Debug, Serialize)]
pub struct PopularCourse {
    pub id: i64,
    pub title: String,
    pub active_enrollments: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_enrollments: Vec<RecentEnrollment>,
    pub popular_courses: Vec<PopularCourse>,
    pub average_score: Decimal,
}

/// GET /api/dashboard
///
/// Aggregated platform overview for any authenticated user:
/// - headline counts (users by role, courses, active enrollments)
/// - the 10 most recent active enrollments with student and course
/// - the 5 courses with the most active enrollments (ties keep insertion order)
/// - the mean quiz-result percentage across the platform (0 when there are
///   no results), 2 decimal places
///
/// ### Responses
/// - `200 OK` with the aggregate payload
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `500 Internal Server Error` - Database error
pub async fn dashboard(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match build_dashboard(db).await {
        Ok(payload) => (
            StatusCode::OK,
            Json(ApiResponse::success(payload, "Dashboard retrieved successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<DashboardResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

async fn build_dashboard(db: &sea_orm::DatabaseConnection) -> Result<DashboardResponse, DbErr> {
    let stats = DashboardStats {
        total_users: UserEntity::find().count(db).await?,
        total_students: UserEntity::find()
            .filter(UserColumn::Role.eq(Role::Student))
            .count(db)
            .await?,
        total_teachers: UserEntity::find()
            .filter(UserColumn::Role.eq(Role::Teacher))
            .count(db)
            .await?,
        total_courses: CourseEntity::find().count(db).await?,
        active_courses: CourseEntity::find()
            .filter(CourseColumn::Status.eq(CourseStatus::Published))
            .count(db)
            .await?,
        total_enrollments: EnrollmentEntity::find()
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active))
            .count(db)
            .await?,
    };

    let recent = EnrollmentEntity::find()
        .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active))
        .order_by_desc(EnrollmentColumn::EnrolledAt)
        .order_by_desc(EnrollmentColumn::Id)
        .limit(10)
        .all(db)
        .await?;

    let mut recent_enrollments = Vec::with_capacity(recent.len());
    for enrollment in recent {
        let student = UserEntity::find_by_id(enrollment.student_id).one(db).await?;
        let course = CourseEntity::find_by_id(enrollment.course_id).one(db).await?;
        if let (Some(student), Some(course)) = (student, course) {
            recent_enrollments.push(RecentEnrollment {
                id: enrollment.id,
                student_name: student.full_name,
                student_email: student.email,
                course_title: course.title,
                enrolled_at: enrollment.enrolled_at.to_rfc3339(),
            });
        }
    }

    // Courses ranked by active-enrollment count. The sort is stable, so ties
    // keep the underlying id order.
    let courses = CourseEntity::find().order_by_asc(CourseColumn::Id).all(db).await?;
    let mut ranked = Vec::with_capacity(courses.len());
    for course in courses {
        let count = CourseModel::active_enrollment_count(db, course.id).await?;
        ranked.push(PopularCourse {
            id: course.id,
            title: course.title,
            active_enrollments: count,
        });
    }
    ranked.sort_by(|a, b| b.active_enrollments.cmp(&a.active_enrollments));
    ranked.truncate(5);

    let average_score = QuizResultModel::overall_average(db).await?;

    Ok(DashboardResponse {
        stats,
        recent_enrollments,
        popular_courses: ranked,
        average_score,
    })
}
