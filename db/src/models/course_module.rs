use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An ordered unit of a course. `order_num` is unique within its course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "course_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub order_num: i32,
    pub is_unlocked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(has_many = "super::lesson::Entity")]
    Lessons,

    #[sea_orm(has_many = "super::quiz::Entity")]
    Quizzes,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lessons.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        title: &str,
        description: Option<&str>,
        order_num: i32,
        is_unlocked: bool,
    ) -> Result<Model, DbErr> {
        let module = ActiveModel {
            course_id: Set(course_id),
            title: Set(title.to_owned()),
            description: Set(description.map(str::to_owned)),
            order_num: Set(order_num),
            is_unlocked: Set(is_unlocked),
            ..Default::default()
        };

        module.insert(db).await
    }
}
