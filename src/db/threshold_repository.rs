use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::analytics::Bounds;
use crate::db::entity::custom_threshold;
use crate::enums::IndicatorType;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ThresholdInput {
    pub bounds: Bounds,
    pub active: bool,
    pub comment: String,
}

/// Per-team overrides, one row per `(team, indicator type)`.
#[derive(Clone)]
pub struct ThresholdRepository {
    db: DatabaseConnection,
}

impl ThresholdRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<custom_threshold::Model>> {
        let rows = custom_threshold::Entity
            ::find()
            .filter(custom_threshold::Column::TeamId.eq(team_id))
            .order_by_asc(custom_threshold::Column::IndicatorType)
            .all(&self.db).await?;
        Ok(rows)
    }

    pub async fn find(
        &self,
        team_id: Uuid,
        indicator: IndicatorType
    ) -> Result<Option<custom_threshold::Model>> {
        let row = custom_threshold::Entity
            ::find()
            .filter(custom_threshold::Column::TeamId.eq(team_id))
            .filter(custom_threshold::Column::IndicatorType.eq(indicator.as_str()))
            .one(&self.db).await?;
        Ok(row)
    }

    pub async fn upsert(
        &self,
        team_id: Uuid,
        indicator: IndicatorType,
        input: ThresholdInput
    ) -> Result<custom_threshold::Model> {
        let now = Utc::now();

        if let Some(existing) = self.find(team_id, indicator).await? {
            let mut active: custom_threshold::ActiveModel = existing.into();
            active.min = ActiveValue::Set(input.bounds.min);
            active.max = ActiveValue::Set(input.bounds.max);
            active.critical = ActiveValue::Set(input.bounds.critical);
            active.active = ActiveValue::Set(input.active);
            active.comment = ActiveValue::Set(input.comment);
            active.last_modified_at = ActiveValue::Set(now);
            let model = active.update(&self.db).await?;
            return Ok(model);
        }

        let model = custom_threshold::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            team_id: ActiveValue::Set(team_id),
            indicator_type: ActiveValue::Set(indicator.to_string()),
            min: ActiveValue::Set(input.bounds.min),
            max: ActiveValue::Set(input.bounds.max),
            critical: ActiveValue::Set(input.bounds.critical),
            active: ActiveValue::Set(input.active),
            comment: ActiveValue::Set(input.comment),
            last_modified_at: ActiveValue::Set(now),
        };
        let model = model.insert(&self.db).await?;
        Ok(model)
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, team_id: Uuid, indicator: IndicatorType) -> Result<bool> {
        let result = custom_threshold::Entity
            ::delete_many()
            .filter(custom_threshold::Column::TeamId.eq(team_id))
            .filter(custom_threshold::Column::IndicatorType.eq(indicator.as_str()))
            .exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
