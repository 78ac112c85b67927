mod common;

use std::time::Duration;

use athlete_monitor::db::NewAlert;
use athlete_monitor::enums::{ AlertLevel, AlertType, IndicatorType };
use athlete_monitor::scheduler::{ EvaluationScheduler, TickSummary };
use athlete_monitor::AppError;
use chrono::Duration as ChronoDuration;
use common::{ noon, setup };
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_evaluations_keep_one_open_alert() {
    let engine = setup().await;
    for days_ago in 0..7 {
        engine.seed_load(days_ago, 100).await;
    }

    let mut tasks = Vec::new();
    for i in 0..8 {
        let analytics = engine.analytics.clone();
        let athlete_id = engine.athlete_id;
        tasks.push(
            tokio::spawn(async move {
                analytics.evaluate(athlete_id, noon() + ChronoDuration::minutes(i)).await
            })
        );
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let overload = engine.alerts_of(AlertType::Indicator(IndicatorType::RcaOverload)).await;
    assert_eq!(overload.len(), 1);
    assert!(!overload[0].treated);
    assert_eq!(engine.alerts_of(AlertType::MissingWellnessEntry).await.len(), 1);
}

#[tokio::test]
async fn tick_skips_athletes_with_an_evaluation_in_flight() {
    let engine = setup().await;
    let (scheduler, _handle) = EvaluationScheduler::new(
        engine.analytics.clone(),
        Duration::from_secs(300)
    );

    let guard = engine.locks.acquire(engine.athlete_id).await;
    let busy = scheduler.run_tick().await;
    assert_eq!(busy, TickSummary { evaluated: 0, skipped: 1, failed: 0 });
    drop(guard);

    let idle = scheduler.run_tick().await;
    assert_eq!(idle, TickSummary { evaluated: 1, skipped: 0, failed: 0 });
}

#[tokio::test]
async fn tick_ignores_inactive_athletes() {
    let engine = setup().await;
    engine.roster
        .upsert_athlete(engine.athlete_id, engine.team_id, "Test Athlete".to_string(), false).await
        .unwrap();
    let (scheduler, _handle) = EvaluationScheduler::new(
        engine.analytics.clone(),
        Duration::from_secs(300)
    );

    assert_eq!(scheduler.run_tick().await, TickSummary::default());
}

#[tokio::test]
async fn duplicate_open_alerts_are_reported() {
    let engine = setup().await;
    for _ in 0..2 {
        engine.alerts
            .insert(
                NewAlert {
                    team_id: engine.team_id,
                    athlete_id: Some(engine.athlete_id),
                    alert_type: AlertType::MissingWellnessEntry,
                    level: AlertLevel::Info,
                    message: "No wellness questionnaire submitted".to_string(),
                    metadata: json!({}),
                },
                noon()
            ).await
            .unwrap();
    }

    let result = engine.analytics.evaluate(engine.athlete_id, noon()).await;

    assert!(matches!(result, Err(AppError::ConcurrencyViolation(_))));
    assert_eq!(engine.alerts_of(AlertType::MissingWellnessEntry).await.len(), 2);
}
