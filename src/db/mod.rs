use chrono::{ DateTime, Utc };
use sea_orm::{ entity::prelude::*, DatabaseConnection, QueryOrder, Set };
use uuid::Uuid;

use crate::error::{ AppError, Result };

pub mod entity;
pub use entity::*;

mod entry_repository;
pub use entry_repository::{ EntryRepository, WellnessInput, EffortInput };

mod threshold_repository;
pub use threshold_repository::{ ThresholdRepository, ThresholdInput };

mod alert_repository;
pub use alert_repository::{ AlertRepository, AlertFilter, NewAlert };

mod snapshot_repository;
pub use snapshot_repository::SnapshotRepository;

/// Athletes and training sessions. Both are owned by external systems; this
/// repository only mirrors what the engine needs.
#[derive(Clone)]
pub struct RosterRepository {
    db: DatabaseConnection,
}

impl RosterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn upsert_athlete(
        &self,
        id: Uuid,
        team_id: Uuid,
        name: String,
        active: bool
    ) -> Result<entity::athlete::Model> {
        let now = Utc::now();

        if let Some(existing) = entity::athlete::Entity::find_by_id(id).one(&self.db).await? {
            let mut athlete: entity::athlete::ActiveModel = existing.into();
            athlete.team_id = Set(team_id);
            athlete.name = Set(name);
            athlete.active = Set(active);
            athlete.updated_at = Set(now);
            return Ok(athlete.update(&self.db).await?);
        }

        let athlete = entity::athlete::ActiveModel {
            id: Set(id),
            team_id: Set(team_id),
            name: Set(name),
            active: Set(active),
            updated_at: Set(now),
        };

        Ok(athlete.insert(&self.db).await?)
    }

    pub async fn find_athlete(&self, id: Uuid) -> Result<entity::athlete::Model> {
        entity::athlete::Entity
            ::find_by_id(id)
            .one(&self.db).await?
            .ok_or_else(|| AppError::NotFound(format!("Athlete {}", id)))
    }

    pub async fn list_active_athletes(&self) -> Result<Vec<entity::athlete::Model>> {
        let athletes = entity::athlete::Entity
            ::find()
            .filter(entity::athlete::Column::Active.eq(true))
            .all(&self.db).await?;

        Ok(athletes)
    }

    pub async fn find_session(&self, id: Uuid) -> Result<Option<entity::training_session::Model>> {
        let session = entity::training_session::Entity::find_by_id(id).one(&self.db).await?;
        Ok(session)
    }

    pub async fn upsert_session(
        &self,
        id: Uuid,
        team_id: Uuid,
        starts_at: DateTime<Utc>,
        duration_minutes: i32,
        cancelled: bool
    ) -> Result<entity::training_session::Model> {
        let now = Utc::now();

        if let Some(existing) = self.find_session(id).await? {
            let mut session: entity::training_session::ActiveModel = existing.into();
            session.team_id = Set(team_id);
            session.starts_at = Set(starts_at);
            session.duration_minutes = Set(duration_minutes);
            session.cancelled = Set(cancelled);
            session.updated_at = Set(now);
            return Ok(session.update(&self.db).await?);
        }

        let session = entity::training_session::ActiveModel {
            id: Set(id),
            team_id: Set(team_id),
            starts_at: Set(starts_at),
            duration_minutes: Set(duration_minutes),
            cancelled: Set(cancelled),
            updated_at: Set(now),
        };

        Ok(session.insert(&self.db).await?)
    }

    pub async fn delete_session(&self, id: Uuid) -> Result<()> {
        entity::training_session::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    /// Non-cancelled team sessions that started inside `[from, to]`.
    pub async fn team_sessions_between(
        &self,
        team_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>
    ) -> Result<Vec<entity::training_session::Model>> {
        let sessions = entity::training_session::Entity
            ::find()
            .filter(entity::training_session::Column::TeamId.eq(team_id))
            .filter(entity::training_session::Column::Cancelled.eq(false))
            .filter(entity::training_session::Column::StartsAt.between(from, to))
            .order_by_asc(entity::training_session::Column::StartsAt)
            .all(&self.db).await?;

        Ok(sessions)
    }
}
