use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Metrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Metrics::UserId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Metrics::Balance).double().not_null().default(0.0))
                    .col(ColumnDef::new(Metrics::Ftds).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Metrics::Leads).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Metrics::Clicks).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Metrics::Cpa).double().not_null().default(0.0))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Metrics::Table, Metrics::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Metrics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Metrics {
    Table,
    UserId,
    Balance,
    Ftds,
    Leads,
    Clicks,
    Cpa,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
