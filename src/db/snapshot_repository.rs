use chrono::{ NaiveDate, Utc };
use sea_orm::{ ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter };
use uuid::Uuid;

use crate::analytics::IndicatorSnapshot;
use crate::db::entity::indicator_snapshot;
use crate::error::Result;

#[derive(Clone)]
pub struct SnapshotRepository {
    db: DatabaseConnection,
}

impl SnapshotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        athlete_id: Uuid,
        as_of: NaiveDate
    ) -> Result<Option<indicator_snapshot::Model>> {
        let row = indicator_snapshot::Entity
            ::find()
            .filter(indicator_snapshot::Column::AthleteId.eq(athlete_id))
            .filter(indicator_snapshot::Column::AsOf.eq(as_of))
            .one(&self.db).await?;
        Ok(row)
    }

    pub async fn upsert(&self, snapshot: &IndicatorSnapshot) -> Result<indicator_snapshot::Model> {
        let now = Utc::now();

        let mut active = match self.find(snapshot.athlete_id, snapshot.as_of).await? {
            Some(existing) => existing.into(),
            None =>
                indicator_snapshot::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    athlete_id: ActiveValue::Set(snapshot.athlete_id),
                    as_of: ActiveValue::Set(snapshot.as_of),
                    ..Default::default()
                },
        };

        active.acute_load = ActiveValue::Set(snapshot.acute_load);
        active.chronic_load = ActiveValue::Set(snapshot.chronic_load);
        active.rca = ActiveValue::Set(snapshot.rca);
        active.monotony = ActiveValue::Set(snapshot.monotony);
        active.strain = ActiveValue::Set(snapshot.strain);
        active.wellness_score = ActiveValue::Set(snapshot.wellness_score);
        active.computed_at = ActiveValue::Set(now);

        let model = if active.id.is_unchanged() {
            active.update(&self.db).await?
        } else {
            active.insert(&self.db).await?
        };
        Ok(model)
    }
}
