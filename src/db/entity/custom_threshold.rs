use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

use crate::analytics::{ Bounds, ThresholdOverride };

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "custom_thresholds")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub team_id: Uuid,
    pub indicator_type: String, // "RCA_OVERLOAD", "RCA_UNDERLOAD", "MONOTONY", "STRAIN", "WELLNESS_LOW", "WELLNESS_HIGH"
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub critical: Option<f64>,
    pub active: bool,
    pub comment: String,
    pub last_modified_at: DateTimeUtc,
}

impl Model {
    /// `None` for rows whose indicator type is no longer recognised.
    pub fn to_override(&self) -> Option<ThresholdOverride> {
        let indicator = self.indicator_type.parse().ok()?;
        Some(ThresholdOverride {
            indicator,
            bounds: Bounds::new(self.min, self.max, self.critical),
            active: self.active,
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
