use std::collections::BTreeSet;

use chrono::{ DateTime, FixedOffset, Utc };
use serde::Deserialize;
use uuid::Uuid;

use crate::db::entity::{ athlete, training_session };
use crate::db::{ EntryRepository, RosterRepository };
use crate::error::{ AppError, Result };

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteSync {
    pub team_id: Uuid,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSync {
    pub team_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[serde(default)]
    pub cancelled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct SessionChange {
    pub session: training_session::Model,
    /// Athletes whose effort entries moved or disappeared.
    pub affected_athletes: Vec<Uuid>,
}

/// Mirrors roster and session data from the collaborating systems. Changes
/// that would move or orphan submitted effort entries need `force`.
#[derive(Clone)]
pub struct RosterService {
    roster: RosterRepository,
    entries: EntryRepository,
    team_offset: FixedOffset,
}

impl RosterService {
    pub fn new(roster: RosterRepository, entries: EntryRepository, team_offset: FixedOffset) -> Self {
        Self {
            roster,
            entries,
            team_offset,
        }
    }

    pub async fn sync_athlete(&self, id: Uuid, request: AthleteSync) -> Result<athlete::Model> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name", "athlete name is required"));
        }
        self.roster.upsert_athlete(id, request.team_id, name, request.active).await
    }

    pub async fn save_session(&self, id: Uuid, request: SessionSync, force: bool) -> Result<SessionChange> {
        if request.duration_minutes <= 0 {
            return Err(AppError::validation("durationMinutes", "must be a positive number of minutes"));
        }

        let existing = self.roster.find_session(id).await?;
        let dependents = self.entries.efforts_for_session(id).await?;

        let reshaped = existing.as_ref().is_some_and(|current| {
            current.starts_at != request.starts_at ||
                current.team_id != request.team_id ||
                current.cancelled != request.cancelled
        });

        if reshaped && !dependents.is_empty() && !force {
            return Err(
                AppError::Conflict(
                    format!(
                        "session {} has {} submitted effort entries; resubmit with force=true to apply the change",
                        id,
                        dependents.len()
                    )
                )
            );
        }

        let session = self.roster.upsert_session(
            id,
            request.team_id,
            request.starts_at,
            request.duration_minutes,
            request.cancelled
        ).await?;

        let affected_athletes = if reshaped && !dependents.is_empty() {
            if session.cancelled {
                self.entries.delete_session_entries(id).await?;
            } else {
                let day = session.starts_at.with_timezone(&self.team_offset).date_naive();
                self.entries.move_session_entries(id, day).await?;
            }
            tracing::warn!(
                "Session {} changed with {} dependent effort entries (forced)",
                id,
                dependents.len()
            );
            distinct_athletes(&dependents)
        } else {
            Vec::new()
        };

        Ok(SessionChange {
            session,
            affected_athletes,
        })
    }

    /// Returns the athletes whose effort entries were removed with the session.
    pub async fn delete_session(&self, id: Uuid, force: bool) -> Result<Vec<Uuid>> {
        if self.roster.find_session(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Session {}", id)));
        }

        let dependents = self.entries.efforts_for_session(id).await?;
        if !dependents.is_empty() && !force {
            return Err(
                AppError::Conflict(
                    format!(
                        "session {} has {} submitted effort entries; resubmit with force=true to delete them too",
                        id,
                        dependents.len()
                    )
                )
            );
        }

        self.entries.delete_session_entries(id).await?;
        self.roster.delete_session(id).await?;
        tracing::info!("Session {} deleted with {} effort entries", id, dependents.len());

        Ok(distinct_athletes(&dependents))
    }
}

fn distinct_athletes(entries: &[crate::db::entity::effort_entry::Model]) -> Vec<Uuid> {
    entries
        .iter()
        .map(|e| e.athlete_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
