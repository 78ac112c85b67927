use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Alerts::Table)
                .if_not_exists()
                .col(ColumnDef::new(Alerts::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Alerts::TeamId).uuid().not_null())
                .col(ColumnDef::new(Alerts::AthleteId).uuid())
                .col(ColumnDef::new(Alerts::AlertType).string().not_null())
                .col(ColumnDef::new(Alerts::Level).string().not_null()) // "INFO", "ATTENTION", "CRITIQUE"
                .col(ColumnDef::new(Alerts::Message).string().not_null())
                .col(ColumnDef::new(Alerts::Priority).integer().not_null())
                .col(ColumnDef::new(Alerts::Read).boolean().not_null().default(false))
                .col(ColumnDef::new(Alerts::Treated).boolean().not_null().default(false))
                .col(ColumnDef::new(Alerts::TreatedAt).timestamp_with_time_zone())
                .col(ColumnDef::new(Alerts::CorrectiveAction).string())
                .col(ColumnDef::new(Alerts::ClearedAt).timestamp_with_time_zone())
                .col(ColumnDef::new(Alerts::Metadata).json().not_null())
                .col(ColumnDef::new(Alerts::CreatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_alerts_team_id")
                .table(Alerts::Table)
                .col(Alerts::TeamId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_alerts_athlete_type_treated")
                .table(Alerts::Table)
                .col(Alerts::AthleteId)
                .col(Alerts::AlertType)
                .col(Alerts::Treated)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Alerts::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Alerts {
    Table,
    Id,
    TeamId,
    AthleteId,
    AlertType,
    Level,
    Message,
    Priority,
    Read,
    Treated,
    TreatedAt,
    CorrectiveAction,
    ClearedAt,
    Metadata,
    CreatedAt,
}
