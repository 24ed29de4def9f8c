use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub points: i32,
    pub difficulty: Difficulty,
    pub order_num: i32,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "question_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QuestionType {
    #[sea_orm(string_value = "single")]
    Single,

    #[sea_orm(string_value = "multiple")]
    Multiple,

    #[sea_orm(string_value = "text")]
    Text,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "question_difficulty")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[sea_orm(string_value = "easy")]
    Easy,

    #[sea_orm(string_value = "medium")]
    Medium,

    #[sea_orm(string_value = "hard")]
    Hard,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id",
        on_delete = "Cascade"
    )]
    Quiz,

    #[sea_orm(has_many = "super::answer::Entity")]
    Answers,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        quiz_id: i64,
        question_text: &str,
        question_type: QuestionType,
        points: i32,
        difficulty: Difficulty,
        order_num: i32,
    ) -> Result<Model, DbErr> {
        let question = ActiveModel {
            quiz_id: Set(quiz_id),
            question_text: Set(question_text.to_owned()),
            question_type: Set(question_type),
            points: Set(points),
            difficulty: Set(difficulty),
            order_num: Set(order_num),
            ..Default::default()
        };

        question.insert(db).await
    }
}
