use axum::{ extract::{ Path, Query, State }, http::StatusCode, Json };
use serde::Deserialize;
use uuid::Uuid;

use crate::db::entity::{ athlete, training_session };
use crate::error::Result;
use crate::services::roster_service::{ AthleteSync, SessionSync };

use super::AppState;

#[derive(Deserialize)]
pub struct ForceQuery {
    #[serde(default)]
    pub force: bool,
}

pub async fn put_athlete(
    State(state): State<AppState>,
    Path(athlete_id): Path<Uuid>,
    Json(request): Json<AthleteSync>
) -> Result<Json<athlete::Model>> {
    let athlete = state.roster_service.sync_athlete(athlete_id, request).await?;

    Ok(Json(athlete))
}

pub async fn put_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ForceQuery>,
    Json(request): Json<SessionSync>
) -> Result<Json<training_session::Model>> {
    let change = state.roster_service.save_session(session_id, request, query.force).await?;
    reevaluate(&state, &change.affected_athletes).await;

    Ok(Json(change.session))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ForceQuery>
) -> Result<StatusCode> {
    let affected = state.roster_service.delete_session(session_id, query.force).await?;
    reevaluate(&state, &affected).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn reevaluate(state: &AppState, athletes: &[Uuid]) {
    for athlete_id in athletes {
        state.scheduler.trigger(*athlete_id).await;
    }
}
