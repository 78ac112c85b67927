use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

use crate::analytics::IndicatorSnapshot;

/// Cached result of the latest evaluation for an athlete and day.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "indicator_snapshots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub as_of: Date,
    pub acute_load: f64,
    pub chronic_load: Option<f64>,
    pub rca: Option<f64>,
    pub monotony: Option<f64>,
    pub strain: Option<f64>,
    pub wellness_score: Option<i32>,
    pub computed_at: DateTimeUtc,
}

impl From<Model> for IndicatorSnapshot {
    fn from(row: Model) -> Self {
        IndicatorSnapshot {
            athlete_id: row.athlete_id,
            as_of: row.as_of,
            acute_load: row.acute_load,
            chronic_load: row.chronic_load,
            rca: row.rca,
            monotony: row.monotony,
            strain: row.strain,
            wellness_score: row.wellness_score,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
