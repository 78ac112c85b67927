use chrono::{ DateTime, Utc };
use uuid::Uuid;

use crate::analytics::{ Outcome, RuleOutcome };
use crate::db::entity::alert;
use crate::db::{ AlertFilter, AlertRepository, NewAlert };
use crate::error::{ AppError, Result };
use crate::locks::AthleteGuard;

/// What an evaluation did to the alert of one `(athlete, type)` key.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertChange {
    Created(alert::Model),
    Refreshed(alert::Model),
    /// Still breaching after treatment; waits for the value to recover first.
    Suppressed,
    Cleared,
    Unchanged,
}

impl AlertChange {
    pub fn alert(&self) -> Option<&alert::Model> {
        match self {
            AlertChange::Created(a) | AlertChange::Refreshed(a) => Some(a),
            _ => None,
        }
    }
}

/// Alert lifecycle: `OPEN_UNREAD -> OPEN_READ -> TREATED`, at most one open
/// alert per `(athlete, type)`.
#[derive(Clone)]
pub struct AlertService {
    alerts: AlertRepository,
}

impl AlertService {
    pub fn new(alerts: AlertRepository) -> Self {
        Self { alerts }
    }

    pub async fn apply(
        &self,
        guard: &AthleteGuard,
        team_id: Uuid,
        athlete_id: Uuid,
        rule: &RuleOutcome,
        now: DateTime<Utc>
    ) -> Result<AlertChange> {
        guard.ensure_covers(athlete_id)?;

        match &rule.outcome {
            Outcome::Undetermined => Ok(AlertChange::Unchanged),
            Outcome::Normal => {
                if self.alerts.find_open(athlete_id, rule.alert_type).await?.is_some() {
                    return Ok(AlertChange::Unchanged);
                }
                match self.alerts.latest_treated(athlete_id, rule.alert_type).await? {
                    Some(treated) if treated.cleared_at.is_none() => {
                        self.alerts.mark_cleared(treated, now).await?;
                        Ok(AlertChange::Cleared)
                    }
                    _ => Ok(AlertChange::Unchanged),
                }
            }
            Outcome::Breach(breach) => {
                if let Some(open) = self.alerts.find_open(athlete_id, rule.alert_type).await? {
                    let refreshed = self.alerts.refresh(
                        open,
                        breach.level,
                        breach.message.clone(),
                        breach.metadata.clone(),
                        now
                    ).await?;
                    return Ok(AlertChange::Refreshed(refreshed));
                }

                if let Some(treated) = self.alerts.latest_treated(athlete_id, rule.alert_type).await? {
                    if treated.cleared_at.is_none() {
                        tracing::debug!(
                            "{} for athlete {} still breaching since treatment of alert {}",
                            rule.alert_type,
                            athlete_id,
                            treated.id
                        );
                        return Ok(AlertChange::Suppressed);
                    }
                }

                let created = self.alerts.insert(
                    NewAlert {
                        team_id,
                        athlete_id: Some(athlete_id),
                        alert_type: rule.alert_type,
                        level: breach.level,
                        message: breach.message.clone(),
                        metadata: breach.metadata.clone(),
                    },
                    now
                ).await?;

                tracing::info!(
                    "Alert {} raised: {} {} for athlete {}",
                    created.id,
                    created.level,
                    created.alert_type,
                    athlete_id
                );

                Ok(AlertChange::Created(created))
            }
        }
    }

    pub async fn find(&self, id: Uuid) -> Result<alert::Model> {
        self.alerts.find_by_id(id).await
    }

    /// Idempotent; treated or already read alerts come back unchanged.
    pub async fn mark_read(&self, id: Uuid) -> Result<alert::Model> {
        let alert = self.alerts.find_by_id(id).await?;
        if alert.read || alert.treated {
            return Ok(alert);
        }
        self.alerts.mark_read(alert).await
    }

    pub async fn treat(&self, id: Uuid, corrective_action: &str, now: DateTime<Utc>) -> Result<alert::Model> {
        let corrective_action = corrective_action.trim();
        if corrective_action.is_empty() {
            return Err(AppError::validation("correctiveAction", "a corrective action is required"));
        }

        let alert = self.alerts.find_by_id(id).await?;
        if alert.treated {
            return Err(AppError::validation("action", format!("alert {} is already treated", id)));
        }

        let treated = self.alerts.mark_treated(alert, corrective_action.to_string(), now).await?;
        tracing::info!("Alert {} treated: {}", treated.id, corrective_action);
        Ok(treated)
    }

    pub async fn list(&self, team_id: Uuid, filter: &AlertFilter) -> Result<Vec<alert::Model>> {
        self.alerts.list(team_id, filter).await
    }
}
