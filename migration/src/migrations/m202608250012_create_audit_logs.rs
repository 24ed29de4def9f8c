use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608250012_create_audit_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("audit_logs"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("action")).string().not_null())
                    .col(ColumnDef::new(Alias::new("table_name")).string().null())
                    .col(ColumnDef::new(Alias::new("record_id")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("old_value")).text().null())
                    .col(ColumnDef::new(Alias::new("new_value")).text().null())
                    .col(ColumnDef::new(Alias::new("ip_address")).string().null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("audit_logs"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("audit_logs")).to_owned())
            .await
    }
}
