//! Create fundings table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fundings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Fundings::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Fundings::FunderName).string_len(255).not_null())
                    .col(ColumnDef::new(Fundings::FunderEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Fundings::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Fundings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Fundings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Fundings {
    Table,
    Id,
    FunderName,
    FunderEmail,
    Amount,
    CreatedAt,
}
