use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::analytics::{ Bounds, ThresholdSet, ThresholdSource };
use crate::db::entity::custom_threshold;
use crate::db::{ ThresholdInput, ThresholdRepository };
use crate::enums::IndicatorType;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdRequest {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub critical: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub comment: String,
}

fn default_active() -> bool {
    true
}

/// The threshold a team is actually evaluated against for one indicator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveThreshold {
    pub indicator_type: IndicatorType,
    pub source: ThresholdSource,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub critical: Option<f64>,
}

#[derive(Clone)]
pub struct ThresholdService {
    thresholds: ThresholdRepository,
}

impl ThresholdService {
    pub fn new(thresholds: ThresholdRepository) -> Self {
        Self { thresholds }
    }

    pub async fn list(&self, team_id: Uuid) -> Result<Vec<custom_threshold::Model>> {
        self.thresholds.list_by_team(team_id).await
    }

    pub async fn resolved(&self, team_id: Uuid) -> Result<ThresholdSet> {
        let overrides: Vec<_> = self.thresholds
            .list_by_team(team_id).await?
            .iter()
            .filter_map(|row| {
                let parsed = row.to_override();
                if parsed.is_none() {
                    tracing::warn!(
                        "Ignoring threshold {} of team {} with unknown indicator type {}",
                        row.id,
                        team_id,
                        row.indicator_type
                    );
                }
                parsed
            })
            .collect();

        Ok(ThresholdSet::resolve(&overrides))
    }

    pub async fn effective(&self, team_id: Uuid) -> Result<Vec<EffectiveThreshold>> {
        let set = self.resolved(team_id).await?;

        Ok(
            IndicatorType::all()
                .iter()
                .map(|indicator| {
                    let resolved = set.get(*indicator);
                    let bounds = resolved.bounds().unwrap_or_default();
                    EffectiveThreshold {
                        indicator_type: *indicator,
                        source: resolved.source(),
                        min: bounds.min,
                        max: bounds.max,
                        critical: bounds.critical,
                    }
                })
                .collect()
        )
    }

    pub async fn upsert(
        &self,
        team_id: Uuid,
        indicator: IndicatorType,
        request: ThresholdRequest
    ) -> Result<custom_threshold::Model> {
        let bounds = Bounds::new(request.min, request.max, request.critical);
        bounds.validate(indicator)?;

        let row = self.thresholds.upsert(team_id, indicator, ThresholdInput {
            bounds,
            active: request.active,
            comment: request.comment.trim().to_string(),
        }).await?;

        tracing::info!(
            "Threshold {} for team {} set (active: {}, min: {:?}, max: {:?}, critical: {:?})",
            indicator,
            team_id,
            row.active,
            row.min,
            row.max,
            row.critical
        );

        Ok(row)
    }

    /// Reverts the indicator to the built-in default for the team.
    pub async fn reset(&self, team_id: Uuid, indicator: IndicatorType) -> Result<bool> {
        let removed = self.thresholds.delete(team_id, indicator).await?;
        if removed {
            tracing::info!("Threshold {} for team {} reverted to default", indicator, team_id);
        }
        Ok(removed)
    }
}
