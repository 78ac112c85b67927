use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

use crate::error::AppError;

// ─── IndicatorType ───────────────────────────────────────────────────

/// Threshold-driven indicator families a team can configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorType {
    RcaOverload,
    RcaUnderload,
    Monotony,
    Strain,
    WellnessLow,
    WellnessHigh,
}

/// Which side of the bounds counts as a breach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Breaches when the value climbs to `max` / `critical`.
    Ceiling,
    /// Breaches when the value drops to `min` / `critical`.
    Floor,
}

impl IndicatorType {
    /// Canonical string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::RcaOverload => "RCA_OVERLOAD",
            IndicatorType::RcaUnderload => "RCA_UNDERLOAD",
            IndicatorType::Monotony => "MONOTONY",
            IndicatorType::Strain => "STRAIN",
            IndicatorType::WellnessLow => "WELLNESS_LOW",
            IndicatorType::WellnessHigh => "WELLNESS_HIGH",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            | IndicatorType::RcaOverload
            | IndicatorType::Monotony
            | IndicatorType::Strain
            | IndicatorType::WellnessHigh => Direction::Ceiling,
            IndicatorType::RcaUnderload | IndicatorType::WellnessLow => Direction::Floor,
        }
    }

    /// Human-readable label used in alert messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            IndicatorType::RcaOverload => "Acute:chronic ratio (overload)",
            IndicatorType::RcaUnderload => "Acute:chronic ratio (underload)",
            IndicatorType::Monotony => "Training monotony",
            IndicatorType::Strain => "Training strain",
            IndicatorType::WellnessLow => "Wellness score (low)",
            IndicatorType::WellnessHigh => "Wellness score (high)",
        }
    }

    pub fn all() -> &'static [IndicatorType] {
        &[
            IndicatorType::RcaOverload,
            IndicatorType::RcaUnderload,
            IndicatorType::Monotony,
            IndicatorType::Strain,
            IndicatorType::WellnessLow,
            IndicatorType::WellnessHigh,
        ]
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RCA_OVERLOAD" => Ok(IndicatorType::RcaOverload),
            "RCA_UNDERLOAD" => Ok(IndicatorType::RcaUnderload),
            "MONOTONY" => Ok(IndicatorType::Monotony),
            "STRAIN" => Ok(IndicatorType::Strain),
            "WELLNESS_LOW" => Ok(IndicatorType::WellnessLow),
            "WELLNESS_HIGH" => Ok(IndicatorType::WellnessHigh),
            _ =>
                Err(
                    AppError::validation(
                        "indicatorType",
                        format!(
                            "Unsupported indicator type: {}. Supported: RCA_OVERLOAD, RCA_UNDERLOAD, MONOTONY, STRAIN, WELLNESS_LOW, WELLNESS_HIGH",
                            s
                        )
                    )
                ),
        }
    }
}

// ─── AlertType ───────────────────────────────────────────────────────

/// Everything an alert can be raised for: a threshold breach on one of the
/// indicators, or a missing daily submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AlertType {
    Indicator(IndicatorType),
    MissingEffortEntry,
    MissingWellnessEntry,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Indicator(indicator) => indicator.as_str(),
            AlertType::MissingEffortEntry => "MISSING_EFFORT_ENTRY",
            AlertType::MissingWellnessEntry => "MISSING_WELLNESS_ENTRY",
        }
    }

    pub fn indicator(&self) -> Option<IndicatorType> {
        match self {
            AlertType::Indicator(indicator) => Some(*indicator),
            _ => None,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MISSING_EFFORT_ENTRY" => Ok(AlertType::MissingEffortEntry),
            "MISSING_WELLNESS_ENTRY" => Ok(AlertType::MissingWellnessEntry),
            other =>
                other
                    .parse::<IndicatorType>()
                    .map(AlertType::Indicator)
                    .map_err(|_| AppError::validation("type", format!("Invalid alert type: {}", s))),
        }
    }
}

impl TryFrom<String> for AlertType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AlertType> for String {
    fn from(value: AlertType) -> Self {
        value.as_str().to_string()
    }
}

impl From<IndicatorType> for AlertType {
    fn from(value: IndicatorType) -> Self {
        AlertType::Indicator(value)
    }
}

// ─── AlertLevel ──────────────────────────────────────────────────────

/// Severity tier of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Info,
    Attention,
    Critique,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "INFO",
            AlertLevel::Attention => "ATTENTION",
            AlertLevel::Critique => "CRITIQUE",
        }
    }

    /// Sort key only; it never decides whether an alert fires.
    pub fn priority(&self) -> i32 {
        match self {
            AlertLevel::Info => 1,
            AlertLevel::Attention => 2,
            AlertLevel::Critique => 3,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INFO" => Ok(AlertLevel::Info),
            "ATTENTION" => Ok(AlertLevel::Attention),
            "CRITIQUE" => Ok(AlertLevel::Critique),
            _ => Err(AppError::validation("level", format!("Invalid alert level: {}", s))),
        }
    }
}
