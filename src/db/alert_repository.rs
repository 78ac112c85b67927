use chrono::{ DateTime, Utc };
use sea_orm::{
    ActiveModelTrait,
    ActiveValue,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
};
use serde_json::Value;
use uuid::Uuid;

use crate::db::entity::alert;
use crate::enums::{ AlertLevel, AlertType };
use crate::error::{ AppError, Result };

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub team_id: Uuid,
    pub athlete_id: Option<Uuid>,
    pub alert_type: AlertType,
    pub level: AlertLevel,
    pub message: String,
    pub metadata: Value,
}

/// Query filters of the team alert list. `unread`/`untreated` select on the
/// flag's value; leaving them out returns both.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub unread: Option<bool>,
    pub untreated: Option<bool>,
    pub athlete_id: Option<Uuid>,
    pub alert_type: Option<AlertType>,
}

#[derive(Clone)]
pub struct AlertRepository {
    db: DatabaseConnection,
}

impl AlertRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<alert::Model> {
        alert::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or_else(|| AppError::NotFound(format!("Alert {}", id)))
    }

    /// The single untreated alert for the key. Finding more than one means
    /// two evaluations of the same athlete were not serialized.
    pub async fn find_open(&self, athlete_id: Uuid, alert_type: AlertType) -> Result<Option<alert::Model>> {
        let mut open = alert::Entity
            ::find()
            .filter(alert::Column::AthleteId.eq(athlete_id))
            .filter(alert::Column::AlertType.eq(alert_type.as_str()))
            .filter(alert::Column::Treated.eq(false))
            .all(&self.db).await?;

        if open.len() > 1 {
            return Err(
                AppError::ConcurrencyViolation(
                    format!(
                        "{} open {} alerts for athlete {}",
                        open.len(),
                        alert_type,
                        athlete_id
                    )
                )
            );
        }

        Ok(open.pop())
    }

    pub async fn latest_treated(
        &self,
        athlete_id: Uuid,
        alert_type: AlertType
    ) -> Result<Option<alert::Model>> {
        let row = alert::Entity
            ::find()
            .filter(alert::Column::AthleteId.eq(athlete_id))
            .filter(alert::Column::AlertType.eq(alert_type.as_str()))
            .filter(alert::Column::Treated.eq(true))
            .order_by_desc(alert::Column::TreatedAt)
            .one(&self.db).await?;
        Ok(row)
    }

    pub async fn insert(&self, new_alert: NewAlert, now: DateTime<Utc>) -> Result<alert::Model> {
        let model = alert::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            team_id: ActiveValue::Set(new_alert.team_id),
            athlete_id: ActiveValue::Set(new_alert.athlete_id),
            alert_type: ActiveValue::Set(new_alert.alert_type.to_string()),
            level: ActiveValue::Set(new_alert.level.to_string()),
            message: ActiveValue::Set(new_alert.message),
            priority: ActiveValue::Set(new_alert.level.priority()),
            read: ActiveValue::Set(false),
            treated: ActiveValue::Set(false),
            treated_at: ActiveValue::Set(None),
            corrective_action: ActiveValue::Set(None),
            cleared_at: ActiveValue::Set(None),
            metadata: ActiveValue::Set(new_alert.metadata),
            created_at: ActiveValue::Set(now),
        };
        let model = model.insert(&self.db).await?;
        Ok(model)
    }

    /// Rewrites an open alert with the latest breach; `created_at` follows the
    /// latest evaluation.
    pub async fn refresh(
        &self,
        existing: alert::Model,
        level: AlertLevel,
        message: String,
        metadata: Value,
        now: DateTime<Utc>
    ) -> Result<alert::Model> {
        let mut active: alert::ActiveModel = existing.into();
        active.level = ActiveValue::Set(level.to_string());
        active.priority = ActiveValue::Set(level.priority());
        active.message = ActiveValue::Set(message);
        active.metadata = ActiveValue::Set(metadata);
        active.created_at = ActiveValue::Set(now);
        let model = active.update(&self.db).await?;
        Ok(model)
    }

    pub async fn mark_read(&self, existing: alert::Model) -> Result<alert::Model> {
        let mut active: alert::ActiveModel = existing.into();
        active.read = ActiveValue::Set(true);
        let model = active.update(&self.db).await?;
        Ok(model)
    }

    pub async fn mark_treated(
        &self,
        existing: alert::Model,
        corrective_action: String,
        now: DateTime<Utc>
    ) -> Result<alert::Model> {
        let mut active: alert::ActiveModel = existing.into();
        active.treated = ActiveValue::Set(true);
        active.treated_at = ActiveValue::Set(Some(now));
        active.corrective_action = ActiveValue::Set(Some(corrective_action));
        let model = active.update(&self.db).await?;
        Ok(model)
    }

    pub async fn mark_cleared(&self, existing: alert::Model, now: DateTime<Utc>) -> Result<alert::Model> {
        let mut active: alert::ActiveModel = existing.into();
        active.cleared_at = ActiveValue::Set(Some(now));
        let model = active.update(&self.db).await?;
        Ok(model)
    }

    /// Team alerts, highest priority first, then most recent first.
    pub async fn list(&self, team_id: Uuid, filter: &AlertFilter) -> Result<Vec<alert::Model>> {
        let mut query = alert::Entity::find().filter(alert::Column::TeamId.eq(team_id));

        if let Some(unread) = filter.unread {
            query = query.filter(alert::Column::Read.eq(!unread));
        }
        if let Some(untreated) = filter.untreated {
            query = query.filter(alert::Column::Treated.eq(!untreated));
        }
        if let Some(athlete_id) = filter.athlete_id {
            query = query.filter(alert::Column::AthleteId.eq(athlete_id));
        }
        if let Some(alert_type) = filter.alert_type {
            query = query.filter(alert::Column::AlertType.eq(alert_type.as_str()));
        }

        let alerts = query
            .order_by_desc(alert::Column::Priority)
            .order_by_desc(alert::Column::CreatedAt)
            .all(&self.db).await?;
        Ok(alerts)
    }
}
