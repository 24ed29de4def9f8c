use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::QuerySelect;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A student's attempt at a quiz. At most one result per (quiz, student).
/// `percentage` is a 2-decimal-place fixed-point value.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quiz_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub score: i32,
    pub max_score: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub percentage: Decimal,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub is_passed: bool,
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

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Records a quiz attempt. The percentage is derived from score and
    /// max_score, rounded to 2 decimal places; the pass flag compares the raw
    /// score against the quiz's passing score.
    pub async fn record(
        db: &DbConn,
        quiz_id: i64,
        student_id: i64,
        score: i32,
        max_score: i32,
        passing_score: i32,
        started_at: DateTime<Utc>,
        submitted_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let percentage = if max_score > 0 {
            (Decimal::from(score) * Decimal::from(100) / Decimal::from(max_score)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        let result = ActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            score: Set(score),
            max_score: Set(max_score),
            percentage: Set(percentage),
            started_at: Set(started_at),
            submitted_at: Set(submitted_at),
            is_passed: Set(score >= passing_score),
            ..Default::default()
        };

        result.insert(db).await
    }

    /// Mean percentage across every quiz result in the system, 2 decimal
    /// places, zero when there are none.
    pub async fn overall_average(db: &DbConn) -> Result<Decimal, DbErr> {
        let percentages: Vec<Decimal> = Entity::find()
            .select_only()
            .column(Column::Percentage)
            .into_tuple()
            .all(db)
            .await?;
        Ok(mean_percentage(&percentages))
    }

    /// Mean percentage across one student's quiz results.
    pub async fn average_for_student(db: &DbConn, student_id: i64) -> Result<Decimal, DbErr> {
        let percentages: Vec<Decimal> = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .select_only()
            .column(Column::Percentage)
            .into_tuple()
            .all(db)
            .await?;
        Ok(mean_percentage(&percentages))
    }
}

/// Mean of a set of percentages, rounded to 2 decimal places. Empty input
/// yields zero rather than an error or null.
pub fn mean_percentage(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    (sum / Decimal::from(values.len() as i64)).round_dp(2)
}
