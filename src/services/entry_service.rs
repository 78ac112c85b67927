use chrono::{ FixedOffset, NaiveDate };
use serde::Deserialize;
use uuid::Uuid;

use crate::db::entity::{ athlete, effort_entry, wellness_entry };
use crate::db::{ EffortInput, EntryRepository, RosterRepository, WellnessInput };
use crate::error::{ AppError, Result };

const SUB_SCORE_MAX: f64 = 7.0;
const EXERTION_MAX: f64 = 10.0;

/// Sub-scores and minutes are read as plain JSON numbers; whole-number checks
/// happen in validation so that they report the offending field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessSubmission {
    pub athlete_id: Uuid,
    pub date: NaiveDate,
    pub sleep: f64,
    pub energy: f64,
    pub soreness: f64,
    pub stress: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortSubmission {
    pub athlete_id: Uuid,
    pub session_id: Uuid,
    pub perceived_exertion: f64,
    pub actual_duration_minutes: f64,
}

fn sub_score(field: &str, value: f64) -> Result<i16> {
    if value.fract() != 0.0 {
        return Err(AppError::validation(field, format!("must be a whole number, got {}", value)));
    }
    if !(0.0..=SUB_SCORE_MAX).contains(&value) {
        return Err(
            AppError::validation(
                field,
                format!("must be between 0 and {}, got {}", SUB_SCORE_MAX, value)
            )
        );
    }
    Ok(value as i16)
}

pub fn validate_wellness(submission: &WellnessSubmission) -> Result<WellnessInput> {
    Ok(WellnessInput {
        athlete_id: submission.athlete_id,
        date: submission.date,
        sleep: sub_score("sleep", submission.sleep)?,
        energy: sub_score("energy", submission.energy)?,
        soreness: sub_score("soreness", submission.soreness)?,
        stress: sub_score("stress", submission.stress)?,
    })
}

/// Checks the value ranges of an effort submission and returns the exertion
/// and duration ready for storage.
pub fn validate_effort(submission: &EffortSubmission) -> Result<(f64, i32)> {
    let exertion = submission.perceived_exertion;
    if !exertion.is_finite() || !(0.0..=EXERTION_MAX).contains(&exertion) {
        return Err(
            AppError::validation(
                "perceivedExertion",
                format!("must be between 0 and {}, got {}", EXERTION_MAX, exertion)
            )
        );
    }
    if (exertion * 2.0).fract() != 0.0 {
        return Err(AppError::validation("perceivedExertion", "must be a multiple of 0.5"));
    }

    let duration = submission.actual_duration_minutes;
    if duration.fract() != 0.0 {
        return Err(
            AppError::validation(
                "actualDurationMinutes",
                format!("must be a whole number of minutes, got {}", duration)
            )
        );
    }
    if duration <= 0.0 || duration > f64::from(i32::MAX) {
        return Err(
            AppError::validation(
                "actualDurationMinutes",
                format!("must be a positive number of minutes, got {}", duration)
            )
        );
    }

    Ok((exertion, duration as i32))
}

/// Validates daily submissions and writes them to the entry store. Values
/// are checked before any store access, so a rejected submission leaves no
/// trace.
#[derive(Clone)]
pub struct EntryService {
    entries: EntryRepository,
    roster: RosterRepository,
    team_offset: FixedOffset,
}

impl EntryService {
    pub fn new(entries: EntryRepository, roster: RosterRepository, team_offset: FixedOffset) -> Self {
        Self {
            entries,
            roster,
            team_offset,
        }
    }

    pub async fn submit_wellness(
        &self,
        submission: &WellnessSubmission
    ) -> Result<(athlete::Model, wellness_entry::Model)> {
        let input = validate_wellness(submission)?;
        let athlete = self.roster.find_athlete(input.athlete_id).await?;
        let entry = self.entries.upsert_wellness(input).await?;

        tracing::debug!(
            "Wellness entry stored for athlete {} on {} (score {})",
            entry.athlete_id,
            entry.date,
            entry.total_score()
        );

        Ok((athlete, entry))
    }

    pub async fn submit_effort(
        &self,
        submission: &EffortSubmission
    ) -> Result<(athlete::Model, effort_entry::Model)> {
        let (perceived_exertion, actual_duration_minutes) = validate_effort(submission)?;
        let athlete = self.roster.find_athlete(submission.athlete_id).await?;
        let session = self.roster
            .find_session(submission.session_id).await?
            .ok_or_else(|| AppError::NotFound(format!("Session {}", submission.session_id)))?;

        if session.team_id != athlete.team_id {
            return Err(
                AppError::validation("sessionId", "session does not belong to the athlete's team")
            );
        }
        if session.cancelled {
            return Err(AppError::validation("sessionId", "session was cancelled"));
        }

        let entry = self.entries.upsert_effort(EffortInput {
            athlete_id: athlete.id,
            session_id: session.id,
            session_date: session.starts_at.with_timezone(&self.team_offset).date_naive(),
            perceived_exertion,
            actual_duration_minutes,
        }).await?;

        tracing::debug!(
            "Effort entry stored for athlete {} session {} (load {})",
            entry.athlete_id,
            entry.session_id,
            entry.daily_load()
        );

        Ok((athlete, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wellness(sleep: f64, energy: f64, soreness: f64, stress: f64) -> WellnessSubmission {
        WellnessSubmission {
            athlete_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            sleep,
            energy,
            soreness,
            stress,
        }
    }

    fn effort(perceived_exertion: f64, actual_duration_minutes: f64) -> EffortSubmission {
        EffortSubmission {
            athlete_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            perceived_exertion,
            actual_duration_minutes,
        }
    }

    #[test]
    fn wellness_sub_scores_must_stay_in_range() {
        assert!(validate_wellness(&wellness(0.0, 7.0, 3.0, 4.0)).is_ok());

        match validate_wellness(&wellness(2.0, 8.0, 1.0, 1.0)) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "energy"),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(validate_wellness(&wellness(-1.0, 1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn fractional_sub_score_names_the_field() {
        match validate_wellness(&wellness(3.5, 1.0, 1.0, 1.0)) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "sleep"),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(validate_wellness(&wellness(1.0, 1.0, f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn exertion_accepts_half_steps_only() {
        assert_eq!(validate_effort(&effort(6.5, 45.0)).unwrap(), (6.5, 45));
        assert!(validate_effort(&effort(0.0, 30.0)).is_ok());
        assert!(validate_effort(&effort(10.0, 30.0)).is_ok());
        assert!(validate_effort(&effort(6.3, 45.0)).is_err());
        assert!(validate_effort(&effort(10.5, 45.0)).is_err());
        assert!(validate_effort(&effort(-0.5, 45.0)).is_err());
        assert!(validate_effort(&effort(f64::NAN, 45.0)).is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        match validate_effort(&effort(5.0, 0.0)) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "actualDurationMinutes"),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(validate_effort(&effort(5.0, -10.0)).is_err());
        assert!(validate_effort(&effort(5.0, 30.5)).is_err());
    }
}
