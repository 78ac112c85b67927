use axum::{ extract::{ Path, State }, http::StatusCode, Json };
use uuid::Uuid;

use crate::db::entity::custom_threshold;
use crate::enums::IndicatorType;
use crate::error::Result;
use crate::services::threshold_service::{ EffectiveThreshold, ThresholdRequest };

use super::AppState;

pub async fn list_thresholds(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>
) -> Result<Json<Vec<custom_threshold::Model>>> {
    let thresholds = state.threshold_service.list(team_id).await?;

    Ok(Json(thresholds))
}

pub async fn effective_thresholds(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>
) -> Result<Json<Vec<EffectiveThreshold>>> {
    let thresholds = state.threshold_service.effective(team_id).await?;

    Ok(Json(thresholds))
}

pub async fn put_threshold(
    State(state): State<AppState>,
    Path((team_id, indicator_type)): Path<(Uuid, String)>,
    Json(request): Json<ThresholdRequest>
) -> Result<Json<custom_threshold::Model>> {
    let indicator: IndicatorType = indicator_type.parse()?;
    let threshold = state.threshold_service.upsert(team_id, indicator, request).await?;

    Ok(Json(threshold))
}

pub async fn delete_threshold(
    State(state): State<AppState>,
    Path((team_id, indicator_type)): Path<(Uuid, String)>
) -> Result<StatusCode> {
    let indicator: IndicatorType = indicator_type.parse()?;
    state.threshold_service.reset(team_id, indicator).await?;

    Ok(StatusCode::NO_CONTENT)
}
