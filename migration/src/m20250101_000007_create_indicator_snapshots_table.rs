use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(IndicatorSnapshots::Table)
                .if_not_exists()
                .col(ColumnDef::new(IndicatorSnapshots::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(IndicatorSnapshots::AthleteId).uuid().not_null())
                .col(ColumnDef::new(IndicatorSnapshots::AsOf).date().not_null())
                .col(ColumnDef::new(IndicatorSnapshots::AcuteLoad).double().not_null())
                .col(ColumnDef::new(IndicatorSnapshots::ChronicLoad).double())
                .col(ColumnDef::new(IndicatorSnapshots::Rca).double())
                .col(ColumnDef::new(IndicatorSnapshots::Monotony).double())
                .col(ColumnDef::new(IndicatorSnapshots::Strain).double())
                .col(ColumnDef::new(IndicatorSnapshots::WellnessScore).integer())
                .col(
                    ColumnDef::new(IndicatorSnapshots::ComputedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_indicator_snapshots_athlete_as_of")
                .table(IndicatorSnapshots::Table)
                .col(IndicatorSnapshots::AthleteId)
                .col(IndicatorSnapshots::AsOf)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(IndicatorSnapshots::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum IndicatorSnapshots {
    Table,
    Id,
    AthleteId,
    AsOf,
    AcuteLoad,
    ChronicLoad,
    Rca,
    Monotony,
    Strain,
    WellnessScore,
    ComputedAt,
}
