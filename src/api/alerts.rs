use axum::{ extract::{ Path, Query, State }, Json };
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::entity::alert;
use crate::db::AlertFilter;
use crate::enums::AlertType;
use crate::error::Result;

use super::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertQuery {
    #[serde(default)]
    pub unread: Option<bool>,
    #[serde(default)]
    pub untreated: Option<bool>,
    #[serde(default)]
    pub athlete_id: Option<Uuid>,
    #[serde(default, rename = "type")]
    pub alert_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AlertAction {
    Read,
    Treat {
        #[serde(default, rename = "correctiveAction")]
        corrective_action: String,
    },
}

pub async fn list_alerts(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Query(query): Query<AlertQuery>
) -> Result<Json<Vec<alert::Model>>> {
    let filter = AlertFilter {
        unread: query.unread,
        untreated: query.untreated,
        athlete_id: query.athlete_id,
        alert_type: query.alert_type
            .as_deref()
            .map(str::parse::<AlertType>)
            .transpose()?,
    };

    let alerts = state.analytics.list_alerts(team_id, &filter).await?;

    Ok(Json(alerts))
}

pub async fn patch_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
    Json(action): Json<AlertAction>
) -> Result<Json<alert::Model>> {
    let alert = match action {
        AlertAction::Read => state.analytics.mark_alert_read(alert_id).await?,
        AlertAction::Treat { corrective_action } =>
            state.analytics.treat_alert(alert_id, &corrective_action, Utc::now()).await?,
    };

    Ok(Json(alert))
}
