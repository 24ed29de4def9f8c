use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250010_create_quiz_results"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("quiz_results"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("quiz_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("student_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("score")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("max_score")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("percentage")).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Alias::new("started_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("submitted_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("is_passed")).boolean().not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("quiz_results"), Alias::new("quiz_id"))
                            .to(Alias::new("quizzes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("quiz_results"), Alias::new("student_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_quiz_results_quiz_student")
                    .table(Alias::new("quiz_results"))
                    .col(Alias::new("quiz_id"))
                    .col(Alias::new("student_id"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("quiz_results")).to_owned())
            .await
    }
}
