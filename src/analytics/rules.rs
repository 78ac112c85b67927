//! Turns a snapshot plus resolved thresholds (and the absence checks) into
//! per-alert-type outcomes. Persistence of the outcomes lives in the alert
//! service.

use chrono::{ NaiveDate, NaiveDateTime, Timelike };
use serde_json::{ json, Value };
use uuid::Uuid;

use crate::enums::{ AlertLevel, AlertType, Direction, IndicatorType };

use super::indicators::IndicatorSnapshot;
use super::thresholds::{ Bounds, ResolvedThreshold, ThresholdSet };

#[derive(Debug, Clone, PartialEq)]
pub struct Breach {
    pub level: AlertLevel,
    pub message: String,
    pub metadata: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Breach(Breach),
    /// Value known and inside bounds.
    Normal,
    /// Value undefined or alerting disabled; nothing may change.
    Undetermined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub alert_type: AlertType,
    pub outcome: Outcome,
}

impl RuleOutcome {
    pub fn breach(&self) -> Option<&Breach> {
        match &self.outcome {
            Outcome::Breach(b) => Some(b),
            _ => None,
        }
    }
}

pub fn evaluate_indicator(
    indicator: IndicatorType,
    snapshot: &IndicatorSnapshot,
    threshold: ResolvedThreshold
) -> Outcome {
    let Some(value) = snapshot.value_for(indicator) else {
        return Outcome::Undetermined;
    };
    let ResolvedThreshold::Enabled { bounds, .. } = threshold else {
        return Outcome::Undetermined;
    };

    match bounds.breach_level(indicator.direction(), value) {
        Some(level) =>
            Outcome::Breach(Breach {
                level,
                message: indicator_message(indicator, level, value, &bounds),
                metadata: json!({
                    "indicator": indicator.as_str(),
                    "value": value,
                    "threshold": bounds,
                    "asOf": snapshot.as_of,
                }),
            }),
        None => Outcome::Normal,
    }
}

pub fn evaluate_indicators(snapshot: &IndicatorSnapshot, thresholds: &ThresholdSet) -> Vec<RuleOutcome> {
    IndicatorType::all()
        .iter()
        .map(|indicator| RuleOutcome {
            alert_type: AlertType::Indicator(*indicator),
            outcome: evaluate_indicator(*indicator, snapshot, thresholds.get(*indicator)),
        })
        .collect()
}

fn indicator_message(indicator: IndicatorType, level: AlertLevel, value: f64, bounds: &Bounds) -> String {
    let crossed = match level {
        AlertLevel::Critique => bounds.critical,
        _ =>
            match indicator.direction() {
                Direction::Ceiling => bounds.max,
                Direction::Floor => bounds.min,
            }
    };

    match crossed {
        Some(limit) =>
            format!(
                "{} at {:.2} crossed the {} threshold ({:.2})",
                indicator.display_name(),
                value,
                if level == AlertLevel::Critique { "critical" } else { "warning" },
                limit
            ),
        None => format!("{} at {:.2}", indicator.display_name(), value),
    }
}

/// A wellness entry is due every day; once the team-local clock passes the
/// cutoff hour without one, the athlete is flagged.
pub fn missing_wellness(local_now: NaiveDateTime, cutoff_hour: u32, has_entry_today: bool) -> RuleOutcome {
    let alert_type = AlertType::MissingWellnessEntry;
    let today = local_now.date();

    let outcome = if has_entry_today {
        Outcome::Normal
    } else if local_now.hour() < cutoff_hour {
        Outcome::Undetermined
    } else {
        Outcome::Breach(Breach {
            level: AlertLevel::Info,
            message: format!("No wellness questionnaire submitted for {}", today),
            metadata: json!({ "date": today }),
        })
    };

    RuleOutcome { alert_type, outcome }
}

/// `overdue_sessions` are completed sessions past their grace period that the
/// athlete has not logged effort for.
pub fn missing_effort(as_of: NaiveDate, overdue_sessions: &[Uuid]) -> RuleOutcome {
    let outcome = if overdue_sessions.is_empty() {
        Outcome::Normal
    } else {
        Outcome::Breach(Breach {
            level: AlertLevel::Attention,
            message: format!(
                "Effort not logged for {} completed session{}",
                overdue_sessions.len(),
                if overdue_sessions.len() == 1 { "" } else { "s" }
            ),
            metadata: json!({ "sessionIds": overdue_sessions, "asOf": as_of }),
        })
    };

    RuleOutcome {
        alert_type: AlertType::MissingEffortEntry,
        outcome,
    }
}
