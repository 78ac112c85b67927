#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use athlete_monitor::config::{ AbsencePolicy, Config, RetryPolicy };
use athlete_monitor::db::entity::{ alert, effort_entry, wellness_entry };
use athlete_monitor::db::{
    AlertRepository,
    EffortInput,
    EntryRepository,
    RosterRepository,
    SnapshotRepository,
    ThresholdRepository,
};
use athlete_monitor::enums::AlertType;
use athlete_monitor::locks::AthleteLocks;
use athlete_monitor::services::entry_service::{ EffortSubmission, WellnessSubmission };
use athlete_monitor::services::{ AlertService, AnalyticsService, RosterService, ThresholdService };
use chrono::{ DateTime, Duration as ChronoDuration, FixedOffset, NaiveDate, TimeZone, Utc };
use migration::MigratorTrait;
use sea_orm::{
    ColumnTrait,
    ConnectOptions,
    Database,
    DatabaseConnection,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

pub struct TestEngine {
    pub db: DatabaseConnection,
    pub locks: Arc<AthleteLocks>,
    pub analytics: Arc<AnalyticsService>,
    pub thresholds: Arc<ThresholdService>,
    pub roster_service: Arc<RosterService>,
    pub roster: RosterRepository,
    pub entries: EntryRepository,
    pub alerts: AlertRepository,
    pub snapshots: SnapshotRepository,
    pub team_id: Uuid,
    pub athlete_id: Uuid,
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        evaluation_interval: Duration::from_secs(300),
        team_offset: FixedOffset::east_opt(0).unwrap(),
        absence: AbsencePolicy::default(),
        retry: RetryPolicy {
            attempts: 2,
            base_delay: Duration::from_millis(1),
        },
    }
}

/// Noon on 2025-03-10, after the wellness cutoff and the effort grace period
/// of a morning session.
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub async fn setup() -> TestEngine {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    migration::Migrator::up(&db, None).await.expect("run migrations");

    let config = Arc::new(test_config());
    let roster = RosterRepository::new(db.clone());
    let entries = EntryRepository::new(db.clone());
    let alerts = AlertRepository::new(db.clone());
    let snapshots = SnapshotRepository::new(db.clone());
    let thresholds = Arc::new(ThresholdService::new(ThresholdRepository::new(db.clone())));
    let locks = Arc::new(AthleteLocks::new());
    let roster_service = Arc::new(
        RosterService::new(roster.clone(), entries.clone(), config.team_offset)
    );

    let analytics = Arc::new(
        AnalyticsService::new(
            config.clone(),
            locks.clone(),
            roster.clone(),
            entries.clone(),
            snapshots.clone(),
            thresholds.clone(),
            AlertService::new(alerts.clone())
        )
    );

    let team_id = Uuid::new_v4();
    let athlete_id = Uuid::new_v4();
    roster.upsert_athlete(athlete_id, team_id, "Test Athlete".to_string(), true).await.unwrap();

    TestEngine {
        db,
        locks,
        analytics,
        thresholds,
        roster_service,
        roster,
        entries,
        alerts,
        snapshots,
        team_id,
        athlete_id,
    }
}

impl TestEngine {
    /// A one-hour session starting at 08:00 UTC `days_ago` days before today.
    pub async fn morning_session(&self, days_ago: i64) -> Uuid {
        let session_id = Uuid::new_v4();
        let starts_at = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap() -
        ChronoDuration::days(days_ago);
        self.roster
            .upsert_session(session_id, self.team_id, starts_at, 60, false).await
            .unwrap();
        session_id
    }

    /// Logs `load` (exertion 5 x `load / 5` minutes) for a new session
    /// `days_ago` days before today.
    pub async fn log_load(&self, days_ago: i64, load: i64) -> Uuid {
        let session_id = self.morning_session(days_ago).await;
        self.analytics
            .submit_effort(
                EffortSubmission {
                    athlete_id: self.athlete_id,
                    session_id,
                    perceived_exertion: 5.0,
                    actual_duration_minutes: (load / 5) as f64,
                },
                noon()
            ).await
            .unwrap();
        session_id
    }

    /// Stores an effort entry directly, without triggering an evaluation.
    pub async fn seed_load(&self, days_ago: i64, load: i32) -> Uuid {
        let session_id = self.morning_session(days_ago).await;
        self.entries
            .upsert_effort(EffortInput {
                athlete_id: self.athlete_id,
                session_id,
                session_date: today() - ChronoDuration::days(days_ago),
                perceived_exertion: 5.0,
                actual_duration_minutes: load / 5,
            }).await
            .unwrap();
        session_id
    }

    /// Every alert of the athlete for `alert_type`, oldest first.
    pub async fn alerts_of(&self, alert_type: AlertType) -> Vec<alert::Model> {
        alert::Entity
            ::find()
            .filter(alert::Column::AthleteId.eq(self.athlete_id))
            .filter(alert::Column::AlertType.eq(alert_type.as_str()))
            .order_by_asc(alert::Column::CreatedAt)
            .all(&self.db).await
            .unwrap()
    }

    pub async fn wellness_count(&self) -> u64 {
        wellness_entry::Entity
            ::find()
            .filter(wellness_entry::Column::AthleteId.eq(self.athlete_id))
            .count(&self.db).await
            .unwrap()
    }

    pub async fn effort_count(&self) -> u64 {
        effort_entry::Entity
            ::find()
            .filter(effort_entry::Column::AthleteId.eq(self.athlete_id))
            .count(&self.db).await
            .unwrap()
    }

    pub async fn log_week(&self, load: i64) {
        for days_ago in 0..7 {
            self.log_load(days_ago, load).await;
        }
    }

    pub fn wellness(&self, sleep: i64, energy: i64, soreness: i64, stress: i64) -> WellnessSubmission {
        WellnessSubmission {
            athlete_id: self.athlete_id,
            date: today(),
            sleep: sleep as f64,
            energy: energy as f64,
            soreness: soreness as f64,
            stress: stress as f64,
        }
    }
}
