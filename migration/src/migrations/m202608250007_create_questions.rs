use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250007_create_questions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("questions"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("quiz_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("question_text")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("question_type"))
                            .enumeration(
                                Alias::new("question_type"),
                                vec![
                                    Alias::new("single"),
                                    Alias::new("multiple"),
                                    Alias::new("text"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("points")).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Alias::new("difficulty"))
                            .enumeration(
                                Alias::new("question_difficulty"),
                                vec![
                                    Alias::new("easy"),
                                    Alias::new("medium"),
                                    Alias::new("hard"),
                                ],
                            )
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Alias::new("order_num")).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("questions"), Alias::new("quiz_id"))
                            .to(Alias::new("quizzes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("questions")).to_owned())
            .await
    }
}
