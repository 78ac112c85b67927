use chrono::{ NaiveDate, Utc };
use sea_orm::{
    ActiveModelTrait,
    ActiveValue,
    ColumnTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::db::entity::{ effort_entry, wellness_entry };
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct WellnessInput {
    pub athlete_id: Uuid,
    pub date: NaiveDate,
    pub sleep: i16,
    pub energy: i16,
    pub soreness: i16,
    pub stress: i16,
}

#[derive(Debug, Clone)]
pub struct EffortInput {
    pub athlete_id: Uuid,
    pub session_id: Uuid,
    pub session_date: NaiveDate,
    pub perceived_exertion: f64,
    pub actual_duration_minutes: i32,
}

/// Durable store for the two daily submission streams. Each key
/// (`athlete + day`, `athlete + session`) holds at most one row; a later
/// submission overwrites the earlier one.
#[derive(Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_wellness(
        &self,
        athlete_id: Uuid,
        date: NaiveDate
    ) -> Result<Option<wellness_entry::Model>> {
        let entry = wellness_entry::Entity
            ::find()
            .filter(wellness_entry::Column::AthleteId.eq(athlete_id))
            .filter(wellness_entry::Column::Date.eq(date))
            .one(&self.db).await?;
        Ok(entry)
    }

    pub async fn upsert_wellness(&self, input: WellnessInput) -> Result<wellness_entry::Model> {
        let now = Utc::now();

        if let Some(existing) = self.find_wellness(input.athlete_id, input.date).await? {
            let mut active: wellness_entry::ActiveModel = existing.into();
            active.sleep = ActiveValue::Set(input.sleep);
            active.energy = ActiveValue::Set(input.energy);
            active.soreness = ActiveValue::Set(input.soreness);
            active.stress = ActiveValue::Set(input.stress);
            active.submitted_at = ActiveValue::Set(now);
            let model = active.update(&self.db).await?;
            return Ok(model);
        }

        let model = wellness_entry::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            athlete_id: ActiveValue::Set(input.athlete_id),
            date: ActiveValue::Set(input.date),
            sleep: ActiveValue::Set(input.sleep),
            energy: ActiveValue::Set(input.energy),
            soreness: ActiveValue::Set(input.soreness),
            stress: ActiveValue::Set(input.stress),
            submitted_at: ActiveValue::Set(now),
        };
        let model = model.insert(&self.db).await?;
        Ok(model)
    }

    pub async fn find_effort(
        &self,
        athlete_id: Uuid,
        session_id: Uuid
    ) -> Result<Option<effort_entry::Model>> {
        let entry = effort_entry::Entity
            ::find()
            .filter(effort_entry::Column::AthleteId.eq(athlete_id))
            .filter(effort_entry::Column::SessionId.eq(session_id))
            .one(&self.db).await?;
        Ok(entry)
    }

    pub async fn upsert_effort(&self, input: EffortInput) -> Result<effort_entry::Model> {
        let now = Utc::now();

        if let Some(existing) = self.find_effort(input.athlete_id, input.session_id).await? {
            let mut active: effort_entry::ActiveModel = existing.into();
            active.session_date = ActiveValue::Set(input.session_date);
            active.perceived_exertion = ActiveValue::Set(input.perceived_exertion);
            active.actual_duration_minutes = ActiveValue::Set(input.actual_duration_minutes);
            active.submitted_at = ActiveValue::Set(now);
            let model = active.update(&self.db).await?;
            return Ok(model);
        }

        let model = effort_entry::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            athlete_id: ActiveValue::Set(input.athlete_id),
            session_id: ActiveValue::Set(input.session_id),
            session_date: ActiveValue::Set(input.session_date),
            perceived_exertion: ActiveValue::Set(input.perceived_exertion),
            actual_duration_minutes: ActiveValue::Set(input.actual_duration_minutes),
            submitted_at: ActiveValue::Set(now),
        };
        let model = model.insert(&self.db).await?;
        Ok(model)
    }

    /// Effort entries whose session fell inside `[from, to]`, oldest first.
    pub async fn efforts_between(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate
    ) -> Result<Vec<effort_entry::Model>> {
        let entries = effort_entry::Entity
            ::find()
            .filter(effort_entry::Column::AthleteId.eq(athlete_id))
            .filter(effort_entry::Column::SessionDate.between(from, to))
            .order_by_asc(effort_entry::Column::SessionDate)
            .all(&self.db).await?;
        Ok(entries)
    }

    /// Which of `session_ids` the athlete has already logged effort for.
    pub async fn logged_sessions(&self, athlete_id: Uuid, session_ids: &[Uuid]) -> Result<Vec<Uuid>> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entries = effort_entry::Entity
            ::find()
            .filter(effort_entry::Column::AthleteId.eq(athlete_id))
            .filter(effort_entry::Column::SessionId.is_in(session_ids.iter().copied()))
            .all(&self.db).await?;
        Ok(
            entries
                .into_iter()
                .map(|e| e.session_id)
                .collect()
        )
    }

    pub async fn efforts_for_session(&self, session_id: Uuid) -> Result<Vec<effort_entry::Model>> {
        let entries = effort_entry::Entity
            ::find()
            .filter(effort_entry::Column::SessionId.eq(session_id))
            .all(&self.db).await?;
        Ok(entries)
    }

    /// Moves every entry of a rescheduled session to its new day.
    pub async fn move_session_entries(&self, session_id: Uuid, session_date: NaiveDate) -> Result<()> {
        for entry in self.efforts_for_session(session_id).await? {
            let mut active: effort_entry::ActiveModel = entry.into();
            active.session_date = ActiveValue::Set(session_date);
            active.update(&self.db).await?;
        }
        Ok(())
    }

    pub async fn delete_session_entries(&self, session_id: Uuid) -> Result<()> {
        effort_entry::Entity
            ::delete_many()
            .filter(effort_entry::Column::SessionId.eq(session_id))
            .exec(&self.db).await?;
        Ok(())
    }
}
