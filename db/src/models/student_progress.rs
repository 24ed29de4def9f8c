use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Tracks how far a student has gotten through a module, optionally pinned to
/// a specific lesson. One row per (student, module, lesson) combination.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "student_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub module_id: i64,
    /// Weak reference: nulled when the lesson is deleted.
    pub lesson_id: Option<i64>,
    pub status: ProgressStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "progress_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProgressStatus {
    #[sea_orm(string_value = "not_started")]
    NotStarted,

    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::course_module::Entity",
        from = "Column::ModuleId",
        to = "super::course_module::Column::Id",
        on_delete = "Cascade"
    )]
    Module,

    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::LessonId",
        to = "super::lesson::Column::Id",
        on_delete = "SetNull"
    )]
    Lesson,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        student_id: i64,
        module_id: i64,
        lesson_id: Option<i64>,
        status: ProgressStatus,
    ) -> Result<Model, DbErr> {
        let progress = ActiveModel {
            student_id: Set(student_id),
            module_id: Set(module_id),
            lesson_id: Set(lesson_id),
            status: Set(status),
            completed_at: Set((status == ProgressStatus::Completed).then(Utc::now)),
            ..Default::default()
        };

        progress.insert(db).await
    }

    /// Moves the progress row to a new status, stamping `completed_at` on
    /// completion and clearing it otherwise.
    pub async fn set_status(db: &DbConn, id: i64, status: ProgressStatus) -> Result<Model, DbErr> {
        let progress = ActiveModel {
            id: Set(id),
            status: Set(status),
            completed_at: Set((status == ProgressStatus::Completed).then(Utc::now)),
            ..Default::default()
        };

        progress.update(db).await
    }
}
