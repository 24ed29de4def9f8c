use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::{
    course::{Column as CourseColumn, Entity as CourseEntity, Model as CourseModel, Status as CourseStatus},
    course_module::{Column as ModuleColumn, Entity as ModuleEntity},
    enrollment::Status as EnrollmentStatus,
    lesson::{Column as LessonColumn, ContentType, Entity as LessonEntity},
    quiz::{Column as QuizColumn, Entity as QuizEntity},
    user::{Column as UserColumn, Entity as UserEntity},
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseListItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher_name: Option<String>,
    pub status: CourseStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_students: Option<i32>,
    pub created_at: String,
    pub active_enrollments: u64,
    pub completed_enrollments: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct CoursesListResponse {
    pub courses: Vec<CourseListItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct LessonItem {
    pub id: i64,
    pub title: String,
    pub content_type: ContentType,
    pub order_num: i32,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct QuizItem {
    pub id: i64,
    pub title: String,
    pub max_score: i32,
    pub passing_score: i32,
    pub is_published: bool,
}

#[derive(Debug, Serialize)]
pub struct ModuleItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub order_num: i32,
    pub is_unlocked: bool,
    pub lessons: Vec<LessonItem>,
    pub quizzes: Vec<QuizItem>,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseDetailResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher_name: Option<String>,
    pub teacher_email: Option<String>,
    pub status: Option<CourseStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub max_students: Option<i32>,
    pub created_at: String,
    pub modules: Vec<ModuleItem>,
    pub active_enrollments: u64,
    pub completed_enrollments: u64,
    pub average_score: Decimal,
}

/// GET /api/courses
///
/// List courses ordered by creation date (newest first), each annotated with
/// active and completed enrollment counts. Open to teachers and admins; all
/// teachers see all courses.
///
/// ### Query Parameters
/// - `status` (optional): Exact match (`draft`, `published`, `archived`)
/// - `search` (optional): Case-insensitive substring match against title OR
///   description OR teacher full name
///
/// ### Responses
/// - `200 OK` with the filtered course list
/// - `400 Bad Request` - Unknown `status` value
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `500 Internal Server Error` - Database error
pub async fn list_courses(
    State(app_state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut condition = Condition::all();

    if let Some(status) = &query.status {
        let Ok(status) = CourseStatus::from_str(status) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<CoursesListResponse>::error(format!(
                    "Unknown status '{}'",
                    status
                ))),
            );
        };
        condition = condition.add(CourseColumn::Status.eq(status));
    }

    if let Some(search) = &query.search {
        condition = condition.add(
            Condition::any()
                .add(CourseColumn::Title.contains(search))
                .add(CourseColumn::Description.contains(search))
                .add(UserColumn::FullName.contains(search)),
        );
    }

    let rows = match CourseEntity::find()
        .find_also_related(UserEntity)
        .filter(condition)
        .order_by_desc(CourseColumn::CreatedAt)
        .order_by_desc(CourseColumn::Id)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CoursesListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut courses = Vec::with_capacity(rows.len());
    for (course, teacher) in rows {
        let counts = match enrollment_counts(db, course.id).await {
            Ok(counts) => counts,
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<CoursesListResponse>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        };
        courses.push(CourseListItem {
            id: course.id,
            title: course.title,
            description: course.description,
            teacher_name: teacher.map(|t| t.full_name),
            status: course.status,
            start_date: course.start_date.map(|d| d.to_string()),
            end_date: course.end_date.map(|d| d.to_string()),
            max_students: course.max_students,
            created_at: course.created_at.to_rfc3339(),
            active_enrollments: counts.0,
            completed_enrollments: counts.1,
        });
    }

    let total = courses.len();
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            CoursesListResponse { courses, total },
            "Courses retrieved successfully",
        )),
    )
}

/// GET /api/courses/{course_id}
///
/// Full course view: teacher, modules in order with their lessons and
/// quizzes (both in order), enrollment counts, and the mean quiz percentage
/// across the course (0 when there are no results).
///
/// ### Responses
/// - `200 OK` with the course detail
/// - `401 Unauthorized` / `403 Forbidden` - Auth failures
/// - `404 Not Found` - No such course
/// - `500 Internal Server Error` - Database error
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let course = match CourseEntity::find_by_id(course_id).one(db).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<CourseDetailResponse>::error("Course not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<CourseDetailResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    match build_course_detail(db, course).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(ApiResponse::success(detail, "Course retrieved successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CourseDetailResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

async fn enrollment_counts(
    db: &sea_orm::DatabaseConnection,
    course_id: i64,
) -> Result<(u64, u64), DbErr> {
    let active = CourseModel::enrollment_count(db, course_id, EnrollmentStatus::Active).await?;
    let completed = CourseModel::enrollment_count(db, course_id, EnrollmentStatus::Completed).await?;
    Ok((active, completed))
}

async fn build_course_detail(
    db: &sea_orm::DatabaseConnection,
    course: db::models::course::Model,
) -> Result<CourseDetailResponse, DbErr> {
    let teacher = UserEntity::find_by_id(course.teacher_id).one(db).await?;

    let modules = ModuleEntity::find()
        .filter(ModuleColumn::CourseId.eq(course.id))
        .order_by_asc(ModuleColumn::OrderNum)
        .all(db)
        .await?;

    let mut module_items = Vec::with_capacity(modules.len());
    for module in modules {
        let lessons = LessonEntity::find()
            .filter(LessonColumn::ModuleId.eq(module.id))
            .order_by_asc(LessonColumn::OrderNum)
            .all(db)
            .await?
            .into_iter()
            .map(|l| LessonItem {
                id: l.id,
                title: l.title,
                content_type: l.content_type,
                order_num: l.order_num,
                duration_minutes: l.duration_minutes,
            })
            .collect();

        let quizzes = QuizEntity::find()
            .filter(QuizColumn::ModuleId.eq(module.id))
            .order_by_asc(QuizColumn::Id)
            .all(db)
            .await?
            .into_iter()
            .map(|q| QuizItem {
                id: q.id,
                title: q.title,
                max_score: q.max_score,
                passing_score: q.passing_score,
                is_published: q.is_published,
            })
            .collect();

        module_items.push(ModuleItem {
            id: module.id,
            title: module.title,
            description: module.description,
            order_num: module.order_num,
            is_unlocked: module.is_unlocked,
            lessons,
            quizzes,
        });
    }

    let (active, completed) = enrollment_counts(db, course.id).await?;
    let average_score = CourseModel::avg_quiz_percentage(db, course.id).await?;

    Ok(CourseDetailResponse {
        id: course.id,
        title: course.title,
        description: course.description,
        teacher_name: teacher.as_ref().map(|t| t.full_name.clone()),
        teacher_email: teacher.map(|t| t.email),
        status: Some(course.status),
        start_date: course.start_date.map(|d| d.to_string()),
        end_date: course.end_date.map(|d| d.to_string()),
        max_students: course.max_students,
        created_at: course.created_at.to_rfc3339(),
        modules: module_items,
        active_enrollments: active,
        completed_enrollments: completed,
        average_score,
    })
}
