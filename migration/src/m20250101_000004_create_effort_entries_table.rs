use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(EffortEntries::Table)
                .if_not_exists()
                .col(ColumnDef::new(EffortEntries::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(EffortEntries::AthleteId).uuid().not_null())
                .col(ColumnDef::new(EffortEntries::SessionId).uuid().not_null())
                .col(ColumnDef::new(EffortEntries::SessionDate).date().not_null())
                .col(ColumnDef::new(EffortEntries::PerceivedExertion).double().not_null())
                .col(ColumnDef::new(EffortEntries::ActualDurationMinutes).integer().not_null())
                .col(
                    ColumnDef::new(EffortEntries::SubmittedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        // One entry per athlete per session
        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_effort_entries_athlete_session")
                .table(EffortEntries::Table)
                .col(EffortEntries::AthleteId)
                .col(EffortEntries::SessionId)
                .unique()
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_effort_entries_athlete_date")
                .table(EffortEntries::Table)
                .col(EffortEntries::AthleteId)
                .col(EffortEntries::SessionDate)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EffortEntries::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum EffortEntries {
    Table,
    Id,
    AthleteId,
    SessionId,
    SessionDate,
    PerceivedExertion,
    ActualDurationMinutes,
    SubmittedAt,
}
