use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Links a student to a course. At most one enrollment exists per
/// (student, course) pair; the storage layer is the arbiter.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Weak reference: nulled when the group is deleted.
    pub group_id: Option<i64>,
    pub status: Status,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "active")]
    Active,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "dropped")]
    Dropped,
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
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "SetNull"
    )]
    Group,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Enrolls a student into a course with `Active` status.
    pub async fn enroll(
        db: &DbConn,
        student_id: i64,
        course_id: i64,
        group_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let enrollment = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            group_id: Set(group_id),
            status: Set(Status::Active),
            enrolled_at: Set(Utc::now()),
            ..Default::default()
        };

        enrollment.insert(db).await
    }

    /// Transitions the enrollment's status, stamping `completed_at` when the
    /// new status is `Completed`.
    pub async fn set_status(db: &DbConn, id: i64, status: Status) -> Result<Model, DbErr> {
        let enrollment = ActiveModel {
            id: Set(id),
            status: Set(status),
            completed_at: Set((status == Status::Completed).then(Utc::now)),
            ..Default::default()
        };

        enrollment.update(db).await
    }
}
