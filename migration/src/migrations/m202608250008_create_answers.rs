use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250008_create_answers"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("answers"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("question_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("answer_text")).text().not_null())
                    .col(ColumnDef::new(Alias::new("is_correct")).boolean().not_null().default(false))
                    .col(ColumnDef::new(Alias::new("order_num")).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("answers"), Alias::new("question_id"))
                            .to(Alias::new("questions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("answers")).to_owned())
            .await
    }
}
