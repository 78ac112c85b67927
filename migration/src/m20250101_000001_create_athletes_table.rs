use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Athletes::Table)
                .if_not_exists()
                .col(ColumnDef::new(Athletes::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Athletes::TeamId).uuid().not_null())
                .col(ColumnDef::new(Athletes::Name).string().not_null())
                .col(ColumnDef::new(Athletes::Active).boolean().not_null().default(true))
                .col(ColumnDef::new(Athletes::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_athletes_team_id")
                .table(Athletes::Table)
                .col(Athletes::TeamId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Athletes::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Athletes {
    Table,
    Id,
    TeamId,
    Name,
    Active,
    UpdatedAt,
}
