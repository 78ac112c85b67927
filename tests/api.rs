mod common;

use athlete_monitor::api::{ router, AppState };
use athlete_monitor::scheduler::EvaluationScheduler;
use axum::body::Body;
use axum::http::{ Method, Request, StatusCode };
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{ json, Value };
use std::time::Duration;
use tower::ServiceExt;

use common::{ setup, TestEngine };

fn app(engine: &TestEngine) -> Router {
    let (_scheduler, handle) = EvaluationScheduler::new(
        engine.analytics.clone(),
        Duration::from_secs(300)
    );
    router(
        AppState::new(
            engine.analytics.clone(),
            engine.thresholds.clone(),
            engine.roster_service.clone(),
            handle
        )
    )
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) =>
            request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_check_responds() {
    let engine = setup().await;

    let response = app(&engine)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn wellness_ingest_validates_and_stores() {
    let engine = setup().await;

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        "/wellness",
        Some(
            json!({
            "athleteId": engine.athlete_id,
            "date": "2025-03-10",
            "sleep": 9,
            "energy": 4,
            "soreness": 4,
            "stress": 4
        })
        )
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "sleep");

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        "/wellness",
        Some(
            json!({
            "athleteId": engine.athlete_id,
            "date": "2025-03-10",
            "sleep": 5,
            "energy": 4,
            "soreness": 4,
            "stress": 4
        })
        )
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sleep"], 5);
    assert_eq!(engine.wellness_count().await, 1);
}

#[tokio::test]
async fn thresholds_can_be_overridden_and_reset() {
    let engine = setup().await;
    let base = format!("/teams/{}/thresholds", engine.team_id);

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        &format!("{}/RCA_OVERLOAD", base),
        Some(json!({ "max": 1.2, "critical": 1.4, "comment": "preseason" }))
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["indicatorType"], "RCA_OVERLOAD");
    assert_eq!(body["active"], true);

    let (status, body) = send(app(&engine), Method::GET, &format!("{}/effective", base), None).await;
    assert_eq!(status, StatusCode::OK);
    let effective = body.as_array().unwrap();
    assert_eq!(effective.len(), 6);
    let overload = effective
        .iter()
        .find(|t| t["indicatorType"] == "RCA_OVERLOAD")
        .unwrap();
    assert_eq!(overload["source"], "custom");
    assert_eq!(overload["max"], 1.2);

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        &format!("{}/RCA_OVERLOAD", base),
        Some(json!({ "max": 1.5, "critical": 1.2 }))
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "critical");

    let (status, _) = send(app(&engine), Method::PUT, &format!("{}/FATIGUE", base), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app(&engine), Method::DELETE, &format!("{}/RCA_OVERLOAD", base), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(app(&engine), Method::GET, &base, None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn alerts_are_listed_read_and_treated() {
    let engine = setup().await;
    engine.log_week(100).await;

    let (status, body) = send(
        app(&engine),
        Method::GET,
        &format!("/teams/{}/alerts?type=RCA_OVERLOAD&untreated=true", engine.team_id),
        None
    ).await;
    assert_eq!(status, StatusCode::OK);
    let alerts = body.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["type"], "RCA_OVERLOAD");
    assert_eq!(alerts[0]["level"], "CRITIQUE");
    let uri = format!("/alerts/{}", alerts[0]["id"].as_str().unwrap());

    let (status, body) = send(app(&engine), Method::PATCH, &uri, Some(json!({ "action": "read" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read"], true);
    assert_eq!(body["treated"], false);

    let (status, body) = send(
        app(&engine),
        Method::PATCH,
        &uri,
        Some(json!({ "action": "treat", "correctiveAction": "  " }))
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "correctiveAction");

    let (status, body) = send(
        app(&engine),
        Method::PATCH,
        &uri,
        Some(json!({ "action": "treat", "correctiveAction": "rest day" }))
    ).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["treated"], true);
    assert_eq!(body["correctiveAction"], "rest day");

    let (_, body) = send(
        app(&engine),
        Method::GET,
        &format!("/teams/{}/alerts?type=RCA_OVERLOAD&untreated=true", engine.team_id),
        None
    ).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn alert_list_is_ordered_by_priority() {
    let engine = setup().await;
    engine.log_week(100).await;

    let (_, body) = send(app(&engine), Method::GET, &format!("/teams/{}/alerts", engine.team_id), None).await;
    let priorities: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["priority"].as_i64().unwrap())
        .collect();

    assert!(!priorities.is_empty());
    assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn indicators_endpoint_returns_snapshot() {
    let engine = setup().await;
    engine.log_week(100).await;

    let (status, body) = send(
        app(&engine),
        Method::GET,
        &format!("/athletes/{}/indicators?asOf=2025-03-10", engine.athlete_id),
        None
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acuteLoad"], 100.0);
    assert_eq!(body["chronicLoad"], 25.0);
    assert_eq!(body["rca"], 4.0);
    assert_eq!(body["monotony"], Value::Null);

    let (status, body) = send(
        app(&engine),
        Method::GET,
        &format!("/athletes/{}/indicators", uuid::Uuid::new_v4()),
        None
    ).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn session_delete_with_entries_needs_confirmation() {
    let engine = setup().await;
    let session_id = engine.log_load(0, 100).await;
    let uri = format!("/sessions/{}", session_id);

    let (status, body) = send(app(&engine), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["requiresConfirmation"], true);

    let (status, _) = send(app(&engine), Method::DELETE, &format!("{}?force=true", uri), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(engine.roster.find_session(session_id).await.unwrap().is_none());
}

#[tokio::test]
async fn roster_sync_upserts_athletes() {
    let engine = setup().await;
    let athlete_id = uuid::Uuid::new_v4();

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        &format!("/athletes/{}", athlete_id),
        Some(json!({ "teamId": engine.team_id, "name": "New Signing" }))
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "New Signing");
    assert_eq!(body["active"], true);
    assert!(engine.roster.find_athlete(athlete_id).await.is_ok());
}

#[tokio::test]
async fn fractional_ingest_values_are_validation_errors() {
    let engine = setup().await;
    let session_id = engine.morning_session(0).await;

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        "/wellness",
        Some(
            json!({
            "athleteId": engine.athlete_id,
            "date": "2025-03-10",
            "sleep": 3.5,
            "energy": 4,
            "soreness": 4,
            "stress": 4
        })
        )
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "sleep");

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        "/effort",
        Some(
            json!({
            "athleteId": engine.athlete_id,
            "sessionId": session_id,
            "perceivedExertion": 6,
            "actualDurationMinutes": 30.5
        })
        )
    ).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "actualDurationMinutes");

    assert_eq!(engine.wellness_count().await, 0);
    assert_eq!(engine.effort_count().await, 0);
}

#[tokio::test]
async fn effort_ingest_accepts_whole_minutes() {
    let engine = setup().await;
    let session_id = engine.morning_session(0).await;

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        "/effort",
        Some(
            json!({
            "athleteId": engine.athlete_id,
            "sessionId": session_id,
            "perceivedExertion": 6.5,
            "actualDurationMinutes": 40
        })
        )
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["perceivedExertion"], 6.5);
    assert_eq!(body["actualDurationMinutes"], 40);
    assert_eq!(engine.effort_count().await, 1);
}

#[tokio::test]
async fn session_sync_returns_the_saved_session() {
    let engine = setup().await;
    let session_id = uuid::Uuid::new_v4();

    let (status, body) = send(
        app(&engine),
        Method::PUT,
        &format!("/sessions/{}", session_id),
        Some(
            json!({
            "teamId": engine.team_id,
            "startsAt": "2025-03-10T08:00:00Z",
            "durationMinutes": 90
        })
        )
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], session_id.to_string());
    assert_eq!(body["durationMinutes"], 90);
    assert_eq!(body["cancelled"], false);
    assert!(engine.roster.find_session(session_id).await.unwrap().is_some());
}
