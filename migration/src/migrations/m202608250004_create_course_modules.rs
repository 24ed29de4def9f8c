use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250004_create_course_modules"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("course_modules"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("course_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("title")).string().not_null())
                    .col(ColumnDef::new(Alias::new("description")).text().null())
                    .col(ColumnDef::new(Alias::new("order_num")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("is_unlocked")).boolean().not_null().default(true))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("course_modules"), Alias::new("course_id"))
                            .to(Alias::new("courses"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_course_modules_course_order")
                    .table(Alias::new("course_modules"))
                    .col(Alias::new("course_id"))
                    .col(Alias::new("order_num"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("course_modules")).to_owned())
            .await
    }
}
