use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity, Model as CourseModel},
    enrollment::{Column as EnrollmentColumn, Entity as EnrollmentEntity, Status as EnrollmentStatus},
    quiz_result::Model as QuizResultModel,
    user::{Column as UserColumn, Entity as UserEntity, Role},
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct CourseReport {
    pub id: i64,
    pub title: String,
    pub active_enrollments: u64,
    pub completed_enrollments: u64,
    pub average_score: Decimal,
}

#[derive(Debug, Serialize)]
pub struct StudentReport {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub active_enrollments: u64,
    pub completed_enrollments: u64,
    pub average_score: Decimal,
}

#[derive(Debug, Serialize, Default)]
pub struct ReportsResponse {
    pub courses: Vec<CourseReport>,
    pub students: Vec<StudentReport>,
}

/// GET /api/reports
///
/// Activity report for any authenticated user:
/// - the 20 newest courses with enrollment counts and mean quiz percentage
/// - the 20 students with the most active enrollments, each with enrollment
///   counts and the mean of their own quiz percentages
///
/// Averages are 0 when the underlying set is empty, 2 decimal places.
///
/// ### Responses
/// - `200 OK` with the report payload
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `500 Internal Server Error` - Database error
pub async fn reports(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db();

    match build_reports(db).await {
        Ok(payload) => (
            StatusCode::OK,
            Json(ApiResponse::success(payload, "Reports retrieved successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ReportsResponse>::error(format!("Database error: {}", e))),
        ),
    }
}

async fn build_reports(db: &sea_orm::DatabaseConnection) -> Result<ReportsResponse, DbErr> {
    let courses = CourseEntity::find()
        .order_by_desc(CourseColumn::CreatedAt)
        .order_by_desc(CourseColumn::Id)
        .limit(20)
        .all(db)
        .await?;

    let mut course_reports = Vec::with_capacity(courses.len());
    for course in courses {
        course_reports.push(CourseReport {
            active_enrollments: CourseModel::enrollment_count(db, course.id, EnrollmentStatus::Active)
                .await?,
            completed_enrollments: CourseModel::enrollment_count(
                db,
                course.id,
                EnrollmentStatus::Completed,
            )
            .await?,
            average_score: CourseModel::avg_quiz_percentage(db, course.id).await?,
            id: course.id,
            title: course.title,
        });
    }

    // Students ranked by active-enrollment count; the sort is stable, so ties
    // keep id order.
    let students = UserEntity::find()
        .filter(UserColumn::Role.eq(Role::Student))
        .order_by_asc(UserColumn::Id)
        .all(db)
        .await?;

    let mut student_reports = Vec::with_capacity(students.len());
    for student in students {
        let active = EnrollmentEntity::find()
            .filter(EnrollmentColumn::StudentId.eq(student.id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active))
            .count(db)
            .await?;
        let completed = EnrollmentEntity::find()
            .filter(EnrollmentColumn::StudentId.eq(student.id))
            .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Completed))
            .count(db)
            .await?;
        let average_score = QuizResultModel::average_for_student(db, student.id).await?;

        student_reports.push(StudentReport {
            id: student.id,
            full_name: student.full_name,
            email: student.email,
            active_enrollments: active,
            completed_enrollments: completed,
            average_score,
        });
    }
    student_reports.sort_by(|a, b| b.active_enrollments.cmp(&a.active_enrollments));
    student_reports.truncate(20);

    Ok(ReportsResponse {
        courses: course_reports,
        students: student_reports,
    })
}
