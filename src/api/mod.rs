use std::sync::Arc;

use axum::{ routing::{ get, patch, put }, Router };
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod entries;
pub mod thresholds;
pub mod alerts;
pub mod indicators;
pub mod roster;

use crate::scheduler::SchedulerHandle;
use crate::services::{ AnalyticsService, RosterService, ThresholdService };

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<AnalyticsService>,
    pub threshold_service: Arc<ThresholdService>,
    pub roster_service: Arc<RosterService>,
    pub scheduler: SchedulerHandle,
}

impl AppState {
    pub fn new(
        analytics: Arc<AnalyticsService>,
        threshold_service: Arc<ThresholdService>,
        roster_service: Arc<RosterService>,
        scheduler: SchedulerHandle
    ) -> Self {
        Self {
            analytics,
            threshold_service,
            roster_service,
            scheduler,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/wellness", put(entries::put_wellness))
        .route("/effort", put(entries::put_effort))
        .route("/teams/{team_id}/thresholds", get(thresholds::list_thresholds))
        .route("/teams/{team_id}/thresholds/effective", get(thresholds::effective_thresholds))
        .route(
            "/teams/{team_id}/thresholds/{indicator_type}",
            put(thresholds::put_threshold).delete(thresholds::delete_threshold)
        )
        .route("/teams/{team_id}/alerts", get(alerts::list_alerts))
        .route("/alerts/{id}", patch(alerts::patch_alert))
        .route("/athletes/{id}", put(roster::put_athlete))
        .route("/athletes/{id}/indicators", get(indicators::get_indicators))
        .route("/sessions/{id}", put(roster::put_session).delete(roster::delete_session))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health_check() -> &'static str {
    "OK"
}
