use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(WellnessEntries::Table)
                .if_not_exists()
                .col(ColumnDef::new(WellnessEntries::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(WellnessEntries::AthleteId).uuid().not_null())
                .col(ColumnDef::new(WellnessEntries::Date).date().not_null())
                .col(ColumnDef::new(WellnessEntries::Sleep).small_integer().not_null())
                .col(ColumnDef::new(WellnessEntries::Energy).small_integer().not_null())
                .col(ColumnDef::new(WellnessEntries::Soreness).small_integer().not_null())
                .col(ColumnDef::new(WellnessEntries::Stress).small_integer().not_null())
                .col(
                    ColumnDef::new(WellnessEntries::SubmittedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        // One entry per athlete per calendar day
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_wellness_entries_athlete_date")
                .table(WellnessEntries::Table)
                .col(WellnessEntries::AthleteId)
                .col(WellnessEntries::Date)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WellnessEntries::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum WellnessEntries {
    Table,
    Id,
    AthleteId,
    Date,
    Sleep,
    Energy,
    Soreness,
    Stress,
    SubmittedAt,
}
