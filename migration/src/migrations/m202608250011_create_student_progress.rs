use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250011_create_student_progress"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("student_progress"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("student_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("module_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("lesson_id")).big_integer().null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("progress_status"),
                                vec![
                                    Alias::new("not_started"),
                                    Alias::new("in_progress"),
                                    Alias::new("completed"),
                                ],
                            )
                            .not_null()
                            .default("not_started"),
                    )
                    .col(ColumnDef::new(Alias::new("completed_at")).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_progress"), Alias::new("student_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_progress"), Alias::new("module_id"))
                            .to(Alias::new("course_modules"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_progress"), Alias::new("lesson_id"))
                            .to(Alias::new("lessons"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_student_progress_student_module_lesson")
                    .table(Alias::new("student_progress"))
                    .col(Alias::new("student_id"))
                    .col(Alias::new("module_id"))
                    .col(Alias::new("lesson_id"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("student_progress")).to_owned())
            .await
    }
}
