use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QuerySelect};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A course owned by a teacher. Deleting the teacher cascades to the course,
/// which in turn cascades through modules, lessons, quizzes, questions and
/// answers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub status: Status,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Optional enrollment cap. Not enforced by the schema.
    pub max_students: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Publication status of a course.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "draft")]
    Draft,

    #[sea_orm(string_value = "published")]
    Published,

    #[sea_orm(string_value = "archived")]
    Archived,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,

    #[sea_orm(has_many = "super::course_module::Entity")]
    Modules,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modules.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        title: &str,
        description: Option<&str>,
        teacher_id: i64,
        status: Status,
        start_date: Option<Date>,
        end_date: Option<Date>,
        max_students: Option<i32>,
    ) -> Result<Model, DbErr> {
        let course = ActiveModel {
            title: Set(title.to_owned()),
            description: Set(description.map(str::to_owned)),
            teacher_id: Set(teacher_id),
            status: Set(status),
            start_date: Set(start_date),
            end_date: Set(end_date),
            max_students: Set(max_students),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        course.insert(db).await
    }

    /// Count of enrollments with the given status for this course.
    pub async fn enrollment_count(
        db: &DbConn,
        course_id: i64,
        status: super::enrollment::Status,
    ) -> Result<u64, DbErr> {
        super::enrollment::Entity::find()
            .filter(super::enrollment::Column::CourseId.eq(course_id))
            .filter(super::enrollment::Column::Status.eq(status))
            .count(db)
            .await
    }

    /// Count of active enrollments for this course.
    pub async fn active_enrollment_count(db: &DbConn, course_id: i64) -> Result<u64, DbErr> {
        Self::enrollment_count(db, course_id, super::enrollment::Status::Active).await
    }

    /// Mean quiz-result percentage across all quizzes belonging to this
    /// course's modules, rounded to 2 decimal places. Zero when there are no
    /// results.
    pub async fn avg_quiz_percentage(db: &DbConn, course_id: i64) -> Result<Decimal, DbErr> {
        let module_ids: Vec<i64> = super::course_module::Entity::find()
            .filter(super::course_module::Column::CourseId.eq(course_id))
            .select_only()
            .column(super::course_module::Column::Id)
            .into_tuple()
            .all(db)
            .await?;

        if module_ids.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let quiz_ids: Vec<i64> = super::quiz::Entity::find()
            .filter(super::quiz::Column::ModuleId.is_in(module_ids))
            .select_only()
            .column(super::quiz::Column::Id)
            .into_tuple()
            .all(db)
            .await?;

        if quiz_ids.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let percentages: Vec<Decimal> = super::quiz_result::Entity::find()
            .filter(super::quiz_result::Column::QuizId.is_in(quiz_ids))
            .select_only()
            .column(super::quiz_result::Column::Percentage)
            .into_tuple()
            .all(db)
            .await?;

        Ok(super::quiz_result::mean_percentage(&percentages))
    }
}
