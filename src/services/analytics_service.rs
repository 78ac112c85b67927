use std::sync::Arc;

use chrono::{ DateTime, Duration, NaiveDate, Utc };
use uuid::Uuid;

use crate::analytics::rules::{ evaluate_indicators, missing_effort, missing_wellness };
use crate::analytics::window::chronic_window_start;
use crate::analytics::{ IndicatorSnapshot, LoadHistory, RuleOutcome };
use crate::config::Config;
use crate::db::entity::{ alert, athlete, effort_entry, wellness_entry };
use crate::db::{ AlertFilter, EntryRepository, RosterRepository, SnapshotRepository };
use crate::error::Result;
use crate::locks::{ AthleteGuard, AthleteLocks };

use super::alert_service::{ AlertChange, AlertService };
use super::entry_service::{ EffortSubmission, EntryService, WellnessSubmission };
use super::threshold_service::ThresholdService;
use super::with_retry;

/// Result of one evaluation run for one athlete.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub athlete_id: Uuid,
    pub snapshot: IndicatorSnapshot,
    pub changes: Vec<(RuleOutcome, AlertChange)>,
}

impl EvaluationReport {
    /// Alerts created or refreshed by this run.
    pub fn raised(&self) -> Vec<&alert::Model> {
        self.changes
            .iter()
            .filter_map(|(_, change)| change.alert())
            .collect()
    }
}

/// Entry point of the engine: ingest, evaluation, alert lifecycle and the
/// indicator read model. Every write for an athlete happens under that
/// athlete's lock.
pub struct AnalyticsService {
    config: Arc<Config>,
    locks: Arc<AthleteLocks>,
    roster: RosterRepository,
    entries: EntryRepository,
    snapshots: SnapshotRepository,
    entry_service: EntryService,
    threshold_service: Arc<ThresholdService>,
    alert_service: AlertService,
}

impl AnalyticsService {
    pub fn new(
        config: Arc<Config>,
        locks: Arc<AthleteLocks>,
        roster: RosterRepository,
        entries: EntryRepository,
        snapshots: SnapshotRepository,
        threshold_service: Arc<ThresholdService>,
        alert_service: AlertService
    ) -> Self {
        let entry_service = EntryService::new(entries.clone(), roster.clone(), config.team_offset);

        Self {
            config,
            locks,
            roster,
            entries,
            snapshots,
            entry_service,
            threshold_service,
            alert_service,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ─── Ingest ──────────────────────────────────────────────────────

    pub async fn submit_wellness(
        &self,
        submission: WellnessSubmission,
        now: DateTime<Utc>
    ) -> Result<wellness_entry::Model> {
        let (athlete, entry) = with_retry(&self.config.retry, "store wellness entry", || {
            self.entry_service.submit_wellness(&submission)
        }).await?;

        self.evaluate_after_ingest(&athlete, now).await;
        Ok(entry)
    }

    pub async fn submit_effort(
        &self,
        submission: EffortSubmission,
        now: DateTime<Utc>
    ) -> Result<effort_entry::Model> {
        let (athlete, entry) = with_retry(&self.config.retry, "store effort entry", || {
            self.entry_service.submit_effort(&submission)
        }).await?;

        self.evaluate_after_ingest(&athlete, now).await;
        Ok(entry)
    }

    /// The entry is already durable at this point; a failed evaluation is
    /// logged and left to the next scheduler tick.
    async fn evaluate_after_ingest(&self, athlete: &athlete::Model, now: DateTime<Utc>) {
        if let Err(e) = self.evaluate(athlete.id, now).await {
            tracing::error!("Evaluation after ingest failed for athlete {}: {}", athlete.id, e);
        }
    }

    // ─── Evaluation ──────────────────────────────────────────────────

    /// Waits for the athlete's lock, then evaluates.
    pub async fn evaluate(&self, athlete_id: Uuid, now: DateTime<Utc>) -> Result<EvaluationReport> {
        let guard = self.locks.acquire(athlete_id).await;
        self.evaluate_with_retry(&guard, now).await
    }

    /// Evaluates unless another evaluation of the athlete is already running,
    /// in which case that run supersedes this one.
    pub async fn evaluate_if_idle(
        &self,
        athlete_id: Uuid,
        now: DateTime<Utc>
    ) -> Result<Option<EvaluationReport>> {
        match self.locks.try_acquire(athlete_id) {
            Some(guard) => Ok(Some(self.evaluate_with_retry(&guard, now).await?)),
            None => {
                tracing::debug!("Skipping athlete {}: evaluation already in flight", athlete_id);
                Ok(None)
            }
        }
    }

    async fn evaluate_with_retry(&self, guard: &AthleteGuard, now: DateTime<Utc>) -> Result<EvaluationReport> {
        with_retry(&self.config.retry, "evaluate athlete", move || self.evaluate_locked(guard, now)).await
    }

    pub async fn evaluate_locked(&self, guard: &AthleteGuard, now: DateTime<Utc>) -> Result<EvaluationReport> {
        let athlete = self.roster.find_athlete(guard.athlete_id()).await?;
        let as_of = self.config.local_date(now);

        let snapshot = self.compute_snapshot(athlete.id, as_of).await?;
        self.snapshots.upsert(&snapshot).await?;

        let mut rules = Vec::new();
        if athlete.active {
            let thresholds = self.threshold_service.resolved(athlete.team_id).await?;
            rules.extend(evaluate_indicators(&snapshot, &thresholds));
            rules.push(self.wellness_presence(&snapshot, now));
            rules.push(self.effort_presence(&athlete, as_of, now).await?);
        }

        let mut changes = Vec::with_capacity(rules.len());
        for rule in rules {
            let change = self.alert_service.apply(guard, athlete.team_id, athlete.id, &rule, now).await?;
            changes.push((rule, change));
        }

        tracing::debug!(
            "Evaluated athlete {} as of {}: acute {:.1}, chronic {:?}, rca {:?}, monotony {:?}, strain {:?}, wellness {:?}",
            athlete.id,
            as_of,
            snapshot.acute_load,
            snapshot.chronic_load,
            snapshot.rca,
            snapshot.monotony,
            snapshot.strain,
            snapshot.wellness_score
        );

        Ok(EvaluationReport {
            athlete_id: athlete.id,
            snapshot,
            changes,
        })
    }

    async fn compute_snapshot(&self, athlete_id: Uuid, as_of: NaiveDate) -> Result<IndicatorSnapshot> {
        let efforts = self.entries.efforts_between(
            athlete_id,
            chronic_window_start(as_of),
            as_of
        ).await?;
        let history = LoadHistory::from_session_loads(
            as_of,
            efforts.iter().map(|e| (e.session_date, e.daily_load()))
        );

        let wellness = self.entries.find_wellness(athlete_id, as_of).await?;

        Ok(IndicatorSnapshot::compute(athlete_id, &history, wellness.map(|w| w.total_score())))
    }

    fn wellness_presence(&self, snapshot: &IndicatorSnapshot, now: DateTime<Utc>) -> RuleOutcome {
        let local_now = now.with_timezone(&self.config.team_offset).naive_local();
        missing_wellness(
            local_now,
            self.config.absence.wellness_cutoff_hour,
            snapshot.wellness_score.is_some()
        )
    }

    async fn effort_presence(
        &self,
        athlete: &athlete::Model,
        as_of: NaiveDate,
        now: DateTime<Utc>
    ) -> Result<RuleOutcome> {
        let policy = &self.config.absence;
        let sessions = self.roster.team_sessions_between(
            athlete.team_id,
            now - Duration::days(policy.effort_lookback_days),
            now
        ).await?;

        let due: Vec<Uuid> = sessions
            .iter()
            .filter(|s| s.ends_at() + policy.effort_grace <= now)
            .map(|s| s.id)
            .collect();

        let logged = self.entries.logged_sessions(athlete.id, &due).await?;
        let overdue: Vec<Uuid> = due
            .into_iter()
            .filter(|id| !logged.contains(id))
            .collect();

        Ok(missing_effort(as_of, &overdue))
    }

    // ─── Read model ──────────────────────────────────────────────────

    /// Snapshot for `as_of` (team-local today by default), computed from the
    /// entry store and cached.
    pub async fn indicators(
        &self,
        athlete_id: Uuid,
        as_of: Option<NaiveDate>,
        now: DateTime<Utc>
    ) -> Result<IndicatorSnapshot> {
        self.roster.find_athlete(athlete_id).await?;
        let as_of = as_of.unwrap_or_else(|| self.config.local_date(now));

        let _guard = self.locks.acquire(athlete_id).await;
        with_retry(&self.config.retry, "compute indicators", move || async move {
            let snapshot = self.compute_snapshot(athlete_id, as_of).await?;
            self.snapshots.upsert(&snapshot).await?;
            Ok(snapshot)
        }).await
    }

    // ─── Alert lifecycle ─────────────────────────────────────────────

    pub async fn list_alerts(&self, team_id: Uuid, filter: &AlertFilter) -> Result<Vec<alert::Model>> {
        with_retry(&self.config.retry, "list alerts", || self.alert_service.list(team_id, filter)).await
    }

    pub async fn mark_alert_read(&self, alert_id: Uuid) -> Result<alert::Model> {
        let alert = self.alert_service.find(alert_id).await?;
        let _guard = match alert.athlete_id {
            Some(athlete_id) => Some(self.locks.acquire(athlete_id).await),
            None => None,
        };
        with_retry(&self.config.retry, "mark alert read", || self.alert_service.mark_read(alert_id)).await
    }

    pub async fn treat_alert(
        &self,
        alert_id: Uuid,
        corrective_action: &str,
        now: DateTime<Utc>
    ) -> Result<alert::Model> {
        let alert = self.alert_service.find(alert_id).await?;
        let _guard = match alert.athlete_id {
            Some(athlete_id) => Some(self.locks.acquire(athlete_id).await),
            None => None,
        };
        with_retry(&self.config.retry, "treat alert", || {
            self.alert_service.treat(alert_id, corrective_action, now)
        }).await
    }

    pub async fn active_athletes(&self) -> Result<Vec<athlete::Model>> {
        with_retry(&self.config.retry, "list athletes", || self.roster.list_active_athletes()).await
    }
}
