use chrono::NaiveDate;
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::enums::IndicatorType;

use super::window::{ mean, population_std_dev, LoadHistory };

/// Derived indicators for one athlete on one day. `None` means there was not
/// enough data to compute the value; it is never coerced to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub athlete_id: Uuid,
    pub as_of: NaiveDate,
    pub acute_load: f64,
    pub chronic_load: Option<f64>,
    pub rca: Option<f64>,
    pub monotony: Option<f64>,
    pub strain: Option<f64>,
    pub wellness_score: Option<i32>,
}

impl IndicatorSnapshot {
    /// Each indicator is computed on its own; one missing value never blocks
    /// the others.
    pub fn compute(athlete_id: Uuid, history: &LoadHistory, wellness_score: Option<i32>) -> Self {
        let acute_load = history.acute_load();
        let chronic_load = history.chronic_load();
        let monotony = monotony(history.acute_series());

        Self {
            athlete_id,
            as_of: history.as_of(),
            acute_load,
            chronic_load,
            rca: acute_chronic_ratio(acute_load, chronic_load),
            monotony,
            strain: strain(history.acute_series(), monotony),
            wellness_score,
        }
    }

    /// The value a threshold of the given type is compared against.
    pub fn value_for(&self, indicator: IndicatorType) -> Option<f64> {
        match indicator {
            IndicatorType::RcaOverload | IndicatorType::RcaUnderload => self.rca,
            IndicatorType::Monotony => self.monotony,
            IndicatorType::Strain => self.strain,
            IndicatorType::WellnessLow | IndicatorType::WellnessHigh =>
                self.wellness_score.map(f64::from),
        }
    }
}

pub fn acute_chronic_ratio(acute_load: f64, chronic_load: Option<f64>) -> Option<f64> {
    match chronic_load {
        Some(chronic) if chronic > 0.0 => Some(acute_load / chronic),
        _ => None,
    }
}

/// Mean over standard deviation of the week's daily loads.
pub fn monotony(week: &[f64]) -> Option<f64> {
    let std_dev = population_std_dev(week);
    if std_dev == 0.0 || !std_dev.is_finite() {
        return None;
    }
    Some(mean(week) / std_dev)
}

/// Weekly load multiplied by monotony.
pub fn strain(week: &[f64], monotony: Option<f64>) -> Option<f64> {
    monotony.map(|m| week.iter().sum::<f64>() * m)
}

/// Sum of the four 0-7 sub-scores.
pub fn wellness_total(sleep: i16, energy: i16, soreness: i16, stress: i16) -> i32 {
    i32::from(sleep) + i32::from(energy) + i32::from(soreness) + i32::from(stress)
}
