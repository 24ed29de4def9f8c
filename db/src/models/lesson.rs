use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Learning material inside a module. The content payload lives in
/// `content_url` or `content_text` depending on `content_type`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub content_type: ContentType,
    pub content_url: Option<String>,
    pub content_text: Option<String>,
    pub order_num: i32,
    pub duration_minutes: Option<i32>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lesson_content_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    #[sea_orm(string_value = "text")]
    Text,

    #[sea_orm(string_value = "video")]
    Video,

    #[sea_orm(string_value = "pdf")]
    Pdf,

    #[sea_orm(string_value = "link")]
    Link,
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
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        module_id: i64,
        title: &str,
        content_type: ContentType,
        content_url: Option<&str>,
        content_text: Option<&str>,
        order_num: i32,
        duration_minutes: Option<i32>,
    ) -> Result<Model, DbErr> {
        let lesson = ActiveModel {
            module_id: Set(module_id),
            title: Set(title.to_owned()),
            content_type: Set(content_type),
            content_url: Set(content_url.map(str::to_owned)),
            content_text: Set(content_text.map(str::to_owned)),
            order_num: Set(order_num),
            duration_minutes: Set(duration_minutes),
            ..Default::default()
        };

        lesson.insert(db).await
    }
}
