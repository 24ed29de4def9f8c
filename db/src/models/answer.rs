use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    pub answer_text: String,
    pub is_correct: bool,
    pub order_num: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_delete = "Cascade"
    )]
    Question,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        question_id: i64,
        answer_text: &str,
        is_correct: bool,
        order_num: i32,
    ) -> Result<Model, DbErr> {
        let answer = ActiveModel {
            question_id: Set(question_id),
            answer_text: Set(answer_text.to_owned()),
            is_correct: Set(is_correct),
            order_num: Set(order_num),
            ..Default::default()
        };

        answer.insert(db).await
    }
}
