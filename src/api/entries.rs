use axum::{ extract::State, Json };
use chrono::Utc;

use crate::db::entity::{ effort_entry, wellness_entry };
use crate::error::Result;
use crate::services::entry_service::{ EffortSubmission, WellnessSubmission };

use super::AppState;

pub async fn put_wellness(
    State(state): State<AppState>,
    Json(request): Json<WellnessSubmission>
) -> Result<Json<wellness_entry::Model>> {
    let entry = state.analytics.submit_wellness(request, Utc::now()).await?;

    Ok(Json(entry))
}

pub async fn put_effort(
    State(state): State<AppState>,
    Json(request): Json<EffortSubmission>
) -> Result<Json<effort_entry::Model>> {
    let entry = state.analytics.submit_effort(request, Utc::now()).await?;

    Ok(Json(entry))
}
