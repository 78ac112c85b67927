use athlete_monitor::{ AppError, Config, Result };
use athlete_monitor::db::{
    AlertRepository,
    EntryRepository,
    RosterRepository,
    SnapshotRepository,
    ThresholdRepository,
};
use athlete_monitor::locks::AthleteLocks;
use athlete_monitor::scheduler::EvaluationScheduler;
use athlete_monitor::services::{ AlertService, AnalyticsService, RosterService, ThresholdService };
use migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "athlete_monitor=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    tracing::info!(
        "Starting athlete-monitor (team offset {}, evaluation every {:?})",
        config.team_offset,
        config.evaluation_interval
    );

    // Initialize database connection
    let db = sea_orm::Database::connect(&config.database_url).await.map_err(AppError::Database)?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await.map_err(AppError::Database)?;

    tracing::info!("Migrations completed successfully");

    // Initialize repositories
    let roster = RosterRepository::new(db.clone());
    let entries = EntryRepository::new(db.clone());
    let thresholds = ThresholdRepository::new(db.clone());
    let alerts = AlertRepository::new(db.clone());
    let snapshots = SnapshotRepository::new(db);

    // Initialize services
    let config = Arc::new(config);
    let threshold_service = Arc::new(ThresholdService::new(thresholds));
    let roster_service = Arc::new(
        RosterService::new(roster.clone(), entries.clone(), config.team_offset)
    );

    let analytics = Arc::new(
        AnalyticsService::new(
            config.clone(),
            Arc::new(AthleteLocks::new()),
            roster,
            entries,
            snapshots,
            threshold_service.clone(),
            AlertService::new(alerts)
        )
    );

    // Start evaluation scheduler
    let (scheduler, scheduler_handle) = EvaluationScheduler::new(
        analytics.clone(),
        config.evaluation_interval
    );
    tokio::spawn(scheduler.start());

    // Create app state
    let app_state = athlete_monitor::api::AppState::new(
        analytics,
        threshold_service,
        roster_service,
        scheduler_handle
    );

    let app = athlete_monitor::api::router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(())
}
