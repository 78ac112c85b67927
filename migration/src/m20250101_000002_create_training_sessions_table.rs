use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(TrainingSessions::Table)
                .if_not_exists()
                .col(ColumnDef::new(TrainingSessions::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(TrainingSessions::TeamId).uuid().not_null())
                .col(
                    ColumnDef::new(TrainingSessions::StartsAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(ColumnDef::new(TrainingSessions::DurationMinutes).integer().not_null())
                .col(
                    ColumnDef::new(TrainingSessions::Cancelled).boolean().not_null().default(false)
                )
                .col(
                    ColumnDef::new(TrainingSessions::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_training_sessions_team_starts_at")
                .table(TrainingSessions::Table)
                .col(TrainingSessions::TeamId)
                .col(TrainingSessions::StartsAt)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TrainingSessions::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum TrainingSessions {
    Table,
    Id,
    TeamId,
    StartsAt,
    DurationMinutes,
    Cancelled,
    UpdatedAt,
}
