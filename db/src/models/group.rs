use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::PaginatorTrait;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A study group. The curator is a weak reference to a teacher: deleting the
/// curator clears the link rather than deleting the group.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_name: String,
    pub curator_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CuratorId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Curator,

    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Curator.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        group_name: &str,
        curator_id: Option<i64>,
        description: Option<&str>,
    ) -> Result<Model, DbErr> {
        let group = ActiveModel {
            group_name: Set(group_name.to_owned()),
            curator_id: Set(curator_id),
            description: Set(description.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        group.insert(db).await
    }

    /// Number of enrollments linked to this group.
    pub async fn enrollment_count(db: &DbConn, group_id: i64) -> Result<u64, DbErr> {
        super::enrollment::Entity::find()
            .filter(super::enrollment::Column::GroupId.eq(group_id))
            .count(db)
            .await
    }
}
