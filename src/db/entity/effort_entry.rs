use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "effort_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub session_id: Uuid,
    /// Team-local day the session started on; loads are bucketed by it.
    pub session_date: Date,
    pub perceived_exertion: f64,
    pub actual_duration_minutes: i32,
    pub submitted_at: DateTimeUtc,
}

impl Model {
    pub fn daily_load(&self) -> f64 {
        crate::analytics::window::session_load(
            self.perceived_exertion,
            self.actual_duration_minutes
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
