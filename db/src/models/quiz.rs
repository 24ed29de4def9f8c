use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub max_score: i32,
    pub passing_score: i32,
    pub time_limit_minutes: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_module::Entity",
        from = "Column::ModuleId",
        to = "super::course_module::Column::Id",
        on_delete = "Cascade"
    )]
    Module,

    #[sea_orm(has_many = "super::question::Entity")]
    Questions,

    #[sea_orm(has_many = "super::quiz_result::Entity")]
    Results,
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::quiz_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        module_id: i64,
        title: &str,
        description: Option<&str>,
        max_score: i32,
        passing_score: i32,
        time_limit_minutes: Option<i32>,
        is_published: bool,
    ) -> Result<Model, DbErr> {
        let quiz = ActiveModel {
            module_id: Set(module_id),
            title: Set(title.to_owned()),
            description: Set(description.map(str::to_owned)),
            max_score: Set(max_score),
            passing_score: Set(passing_score),
            time_limit_minutes: Set(time_limit_minutes),
            is_published: Set(is_published),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        quiz.insert(db).await
    }
}
