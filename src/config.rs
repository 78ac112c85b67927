use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::{ DateTime, FixedOffset, NaiveDate, Utc };

/// Timing rules for the two absence-driven alerts.
#[derive(Debug, Clone)]
pub struct AbsencePolicy {
    /// Team-local hour after which a missing wellness entry alerts.
    pub wellness_cutoff_hour: u32,
    /// Grace period after a session ends before a missing effort entry alerts.
    pub effort_grace: chrono::Duration,
    /// Sessions that ended longer ago than this are no longer chased.
    pub effort_lookback_days: i64,
}

impl Default for AbsencePolicy {
    fn default() -> Self {
        Self {
            wellness_cutoff_hour: 10,
            effort_grace: chrono::Duration::hours(2),
            effort_lookback_days: 7,
        }
    }
}

/// Persistence retry budget applied by the analytics facade.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub evaluation_interval: Duration,
    pub team_offset: FixedOffset,
    pub absence: AbsencePolicy,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = parse_var("SERVER_PORT", 8080u16)?;

        let interval_secs = parse_var("EVALUATION_INTERVAL_SECS", 300u64)?;
        if interval_secs == 0 {
            return Err("EVALUATION_INTERVAL_SECS must be greater than 0".into());
        }

        let offset_minutes = parse_var("TEAM_UTC_OFFSET_MINUTES", 0i32)?;
        let team_offset = FixedOffset::east_opt(offset_minutes * 60).ok_or(
            "TEAM_UTC_OFFSET_MINUTES must be within +/- 24 hours"
        )?;

        let wellness_cutoff_hour = parse_var("WELLNESS_CUTOFF_HOUR", 10u32)?;
        if wellness_cutoff_hour > 23 {
            return Err("WELLNESS_CUTOFF_HOUR must be between 0 and 23".into());
        }

        let absence = AbsencePolicy {
            wellness_cutoff_hour,
            effort_grace: chrono::Duration::hours(parse_var("EFFORT_GRACE_HOURS", 2i64)?),
            effort_lookback_days: parse_var("MISSING_EFFORT_LOOKBACK_DAYS", 7i64)?.max(1),
        };

        let retry = RetryPolicy {
            attempts: parse_var("STORE_RETRY_ATTEMPTS", 3u32)?.max(1),
            base_delay: Duration::from_millis(parse_var("STORE_RETRY_BASE_MS", 100u64)?),
        };

        Ok(Config {
            database_url,
            server_host,
            server_port,
            evaluation_interval: Duration::from_secs(interval_secs),
            team_offset,
            absence,
            retry,
        })
    }

    /// Calendar day at the team's location for the given instant.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.team_offset).date_naive()
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
    where T: FromStr, T::Err: std::fmt::Display
{
    match env::var(key) {
        Ok(raw) =>
            raw
                .trim()
                .parse::<T>()
                .map_err(|e| format!("{} has an invalid value '{}': {}", key, raw, e).into()),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config_with_offset(minutes: i32) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            evaluation_interval: Duration::from_secs(60),
            team_offset: FixedOffset::east_opt(minutes * 60).unwrap(),
            absence: AbsencePolicy::default(),
            retry: RetryPolicy::default(),
        }
    }

    #[test]
    fn local_date_applies_team_offset() {
        let late_evening_utc = Utc.with_ymd_and_hms(2025, 3, 10, 23, 30, 0).unwrap();

        assert_eq!(
            config_with_offset(0).local_date(late_evening_utc),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert_eq!(
            config_with_offset(60).local_date(late_evening_utc),
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
        );
    }

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let value: u64 = parse_var("ATHLETE_MONITOR_TEST_UNSET_KEY", 42).unwrap();
        assert_eq!(value, 42);
    }
}
