use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Substations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Substations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Substations::SubstationName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Substations::FullName).string_len(100).null())
                    .col(ColumnDef::new(Substations::PNumber).string_len(50).null())
                    .col(
                        ColumnDef::new(Substations::BreakerName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Substations::FeedingStationDetails)
                            .string_len(150)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Substations::BayName).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_substations_breaker_name")
                    .table(Substations::Table)
                    .col(Substations::BreakerName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Substations::Table).to_owned())
            .await
    }
}

/// Table and column identifiers for substations
#[derive(DeriveIden)]
enum Substations {
    Table,
    Id,
    SubstationName,
    FullName,
    PNumber,
    BreakerName,
    FeedingStationDetails,
    BayName,
}
