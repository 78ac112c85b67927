pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_athletes_table;
mod m20250101_000002_create_training_sessions_table;
mod m20250101_000003_create_wellness_entries_table;
mod m20250101_000004_create_effort_entries_table;
mod m20250101_000005_create_custom_thresholds_table;
mod m20250101_000006_create_alerts_table;
mod m20250101_000007_create_indicator_snapshots_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_athletes_table::Migration),
            Box::new(m20250101_000002_create_training_sessions_table::Migration),
            Box::new(m20250101_000003_create_wellness_entries_table::Migration),
            Box::new(m20250101_000004_create_effort_entries_table::Migration),
            Box::new(m20250101_000005_create_custom_thresholds_table::Migration),
            Box::new(m20250101_000006_create_alerts_table::Migration),
            Box::new(m20250101_000007_create_indicator_snapshots_table::Migration)
        ]
    }
}
