use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{ Mutex, OwnedMutexGuard };
use uuid::Uuid;

use crate::error::{ AppError, Result };

/// One async mutex per athlete. Every evaluation and alert mutation for an
/// athlete runs while holding that athlete's guard.
#[derive(Default)]
pub struct AthleteLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

/// Proof that the holder is the only writer for `athlete_id` right now.
pub struct AthleteGuard {
    athlete_id: Uuid,
    _permit: OwnedMutexGuard<()>,
}

impl AthleteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, athlete_id: Uuid) -> Arc<Mutex<()>> {
        // shard lock is released before anyone awaits the mutex
        self.locks.entry(athlete_id).or_default().clone()
    }

    pub async fn acquire(&self, athlete_id: Uuid) -> AthleteGuard {
        let permit = self.slot(athlete_id).lock_owned().await;
        AthleteGuard {
            athlete_id,
            _permit: permit,
        }
    }

    /// `None` when another evaluation of the athlete is in flight.
    pub fn try_acquire(&self, athlete_id: Uuid) -> Option<AthleteGuard> {
        let permit = self.slot(athlete_id).try_lock_owned().ok()?;
        Some(AthleteGuard {
            athlete_id,
            _permit: permit,
        })
    }
}

impl AthleteGuard {
    pub fn athlete_id(&self) -> Uuid {
        self.athlete_id
    }

    pub fn ensure_covers(&self, athlete_id: Uuid) -> Result<()> {
        if self.athlete_id != athlete_id {
            let msg = format!(
                "write for athlete {} attempted under the guard of athlete {}",
                athlete_id,
                self.athlete_id
            );
            tracing::error!("{}", msg);
            return Err(AppError::ConcurrencyViolation(msg));
        }
        Ok(())
    }
}
