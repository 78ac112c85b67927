use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{ interval, Duration, MissedTickBehavior };
use uuid::Uuid;

use crate::services::AnalyticsService;

const TRIGGER_QUEUE_SIZE: usize = 1024;

/// Queues an athlete for evaluation outside the request path.
#[derive(Clone)]
pub struct SchedulerHandle {
    tx: mpsc::Sender<Uuid>,
}

impl SchedulerHandle {
    pub async fn trigger(&self, athlete_id: Uuid) {
        if self.tx.send(athlete_id).await.is_err() {
            tracing::warn!("Scheduler stopped; evaluation of athlete {} dropped", athlete_id);
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub evaluated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Background evaluation loop. Entry-triggered evaluations keep the engine
/// correct on their own; the periodic tick catches up on time-driven alerts
/// (missing entries, day rollover).
pub struct EvaluationScheduler {
    analytics: Arc<AnalyticsService>,
    period: Duration,
    triggers: mpsc::Receiver<Uuid>,
}

impl EvaluationScheduler {
    pub fn new(analytics: Arc<AnalyticsService>, period: Duration) -> (Self, SchedulerHandle) {
        let (tx, triggers) = mpsc::channel(TRIGGER_QUEUE_SIZE);
        (
            Self {
                analytics,
                period,
                triggers,
            },
            SchedulerHandle { tx },
        )
    }

    pub async fn start(mut self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Evaluation scheduler started (every {:?})", self.period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let summary = self.run_tick().await;
                    tracing::info!(
                        "Evaluation tick: {} evaluated, {} skipped, {} failed",
                        summary.evaluated,
                        summary.skipped,
                        summary.failed
                    );
                }
                trigger = self.triggers.recv() => {
                    match trigger {
                        Some(athlete_id) => self.spawn_triggered(athlete_id),
                        None => {
                            tracing::info!("Trigger channel closed; scheduler stopping");
                            break;
                        }
                    }
                }
            }
        }
    }

    fn spawn_triggered(&self, athlete_id: Uuid) {
        let analytics = self.analytics.clone();
        tokio::spawn(async move {
            if let Err(e) = analytics.evaluate(athlete_id, Utc::now()).await {
                tracing::error!("Triggered evaluation failed for athlete {}: {}", athlete_id, e);
            }
        });
    }

    /// Evaluates every active athlete concurrently, one task per athlete.
    /// Athletes with an evaluation already in flight are skipped.
    pub async fn run_tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();

        let athletes = match self.analytics.active_athletes().await {
            Ok(athletes) => athletes,
            Err(e) => {
                tracing::error!("Scheduler could not load athletes: {}", e);
                return summary;
            }
        };

        let now = Utc::now();
        let mut tasks = JoinSet::new();
        for athlete in athletes {
            let analytics = self.analytics.clone();
            tasks.spawn(async move {
                (athlete.id, analytics.evaluate_if_idle(athlete.id, now).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(Some(_)))) => {
                    summary.evaluated += 1;
                }
                Ok((_, Ok(None))) => {
                    summary.skipped += 1;
                }
                Ok((athlete_id, Err(e))) => {
                    summary.failed += 1;
                    tracing::error!("Scheduled evaluation failed for athlete {}: {}", athlete_id, e);
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("Evaluation task panicked: {}", e);
                }
            }
        }

        summary
    }
}
