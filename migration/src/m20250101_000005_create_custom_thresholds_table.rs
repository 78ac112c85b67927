use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(CustomThresholds::Table)
                .if_not_exists()
                .col(ColumnDef::new(CustomThresholds::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(CustomThresholds::TeamId).uuid().not_null())
                .col(ColumnDef::new(CustomThresholds::IndicatorType).string().not_null()) // "RCA_OVERLOAD", "MONOTONY", ...
                .col(ColumnDef::new(CustomThresholds::Min).double())
                .col(ColumnDef::new(CustomThresholds::Max).double())
                .col(ColumnDef::new(CustomThresholds::Critical).double())
                .col(ColumnDef::new(CustomThresholds::Active).boolean().not_null().default(true))
                .col(ColumnDef::new(CustomThresholds::Comment).string().not_null().default(""))
                .col(
                    ColumnDef::new(CustomThresholds::LastModifiedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_custom_thresholds_team_indicator")
                .table(CustomThresholds::Table)
                .col(CustomThresholds::TeamId)
                .col(CustomThresholds::IndicatorType)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CustomThresholds::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum CustomThresholds {
    Table,
    Id,
    TeamId,
    IndicatorType,
    Min,
    Max,
    Critical,
    Active,
    Comment,
    LastModifiedAt,
}
