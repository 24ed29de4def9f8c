use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250009_create_enrollments"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("enrollments"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("student_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("course_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("group_id")).big_integer().null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("enrollment_status"),
                                vec![
                                    Alias::new("active"),
                                    Alias::new("completed"),
                                    Alias::new("dropped"),
                                ],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Alias::new("enrolled_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("completed_at")).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollments"), Alias::new("student_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollments"), Alias::new("course_id"))
                            .to(Alias::new("courses"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("enrollments"), Alias::new("group_id"))
                            .to(Alias::new("groups"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_enrollments_student_course")
                    .table(Alias::new("enrollments"))
                    .col(Alias::new("student_id"))
                    .col(Alias::new("course_id"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("enrollments")).to_owned())
            .await
    }
}
