use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub team_id: Uuid,
    pub athlete_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub level: String, // "INFO", "ATTENTION", "CRITIQUE"
    pub message: String,
    pub priority: i32,
    pub read: bool,
    pub treated: bool,
    pub treated_at: Option<DateTimeUtc>,
    pub corrective_action: Option<String>,
    /// Set once the indicator is seen normal again after treatment; until
    /// then a persisting breach does not open a fresh alert.
    #[serde(skip_serializing)]
    pub cleared_at: Option<DateTimeUtc>,
    pub metadata: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
