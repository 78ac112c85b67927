use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wellness_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub date: Date,
    pub sleep: i16,
    pub energy: i16,
    pub soreness: i16,
    pub stress: i16,
    pub submitted_at: DateTimeUtc,
}

impl Model {
    pub fn total_score(&self) -> i32 {
        crate::analytics::indicators::wellness_total(
            self.sleep,
            self.energy,
            self.soreness,
            self.stress
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
