use axum::{ extract::{ Path, Query, State }, Json };
use chrono::{ NaiveDate, Utc };
use serde::Deserialize;
use uuid::Uuid;

use crate::analytics::IndicatorSnapshot;
use crate::error::Result;

use super::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorQuery {
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

pub async fn get_indicators(
    State(state): State<AppState>,
    Path(athlete_id): Path<Uuid>,
    Query(query): Query<IndicatorQuery>
) -> Result<Json<IndicatorSnapshot>> {
    let snapshot = state.analytics.indicators(athlete_id, query.as_of, Utc::now()).await?;

    Ok(Json(snapshot))
}
