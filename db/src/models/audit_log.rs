use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of an administrative mutation. Rows are never updated
/// or deleted; deleting the acting user only nulls `user_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Weak reference: nulled when the acting user is deleted.
    pub user_id: Option<i64>,
    pub action: String,
    pub table_name: Option<String>,
    pub record_id: Option<i64>,
    /// JSON snapshot of the row before the change, stored opaquely.
    pub old_value: Option<String>,
    /// JSON snapshot of the row after the change, stored opaquely.
    pub new_value: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Appends an audit entry. Value snapshots are serialized JSON produced
    /// by the caller; this layer does not interpret them.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        db: &DbConn,
        user_id: Option<i64>,
        action: &str,
        table_name: Option<&str>,
        record_id: Option<i64>,
        old_value: Option<String>,
        new_value: Option<String>,
        ip_address: Option<&str>,
    ) -> Result<Model, DbErr> {
        let entry = ActiveModel {
            user_id: Set(user_id),
            action: Set(action.to_owned()),
            table_name: Set(table_name.map(str::to_owned)),
            record_id: Set(record_id),
            old_value: Set(old_value),
            new_value: Set(new_value),
            ip_address: Set(ip_address.map(str::to_owned)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        entry.insert(db).await
    }
}
