use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250005_create_lessons"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("lessons"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("module_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("title")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("content_type"))
                            .enumeration(
                                Alias::new("lesson_content_type"),
                                vec![
                                    Alias::new("text"),
                                    Alias::new("video"),
                                    Alias::new("pdf"),
                                    Alias::new("link"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("content_url")).string().null())
                    .col(ColumnDef::new(Alias::new("content_text")).text().null())
                    .col(ColumnDef::new(Alias::new("order_num")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("duration_minutes")).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("lessons"), Alias::new("module_id"))
                            .to(Alias::new("course_modules"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("lessons")).to_owned())
            .await
    }
}
