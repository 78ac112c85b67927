//! Threshold resolution and breach classification.
//!
//! A team may store one custom threshold per indicator type. An active custom
//! row replaces the built-in default wholesale (unset sides stay unset), an
//! inactive row switches alerting for that indicator off, and no row at all
//! means the default applies.

use std::collections::HashMap;

use serde::{ Deserialize, Serialize };

use crate::enums::{ AlertLevel, Direction, IndicatorType };
use crate::error::{ AppError, Result };

/// `{min?, max?, critical?}` for one indicator. An unset bound never breaches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub critical: Option<f64>,
}

impl Bounds {
    pub const fn new(min: Option<f64>, max: Option<f64>, critical: Option<f64>) -> Self {
        Self { min, max, critical }
    }

    /// Critical is checked before the warning bound. `None` means normal.
    pub fn breach_level(&self, direction: Direction, value: f64) -> Option<AlertLevel> {
        match direction {
            Direction::Ceiling => {
                if self.critical.is_some_and(|c| value >= c) {
                    Some(AlertLevel::Critique)
                } else if self.max.is_some_and(|m| value >= m) {
                    Some(AlertLevel::Attention)
                } else {
                    None
                }
            }
            Direction::Floor => {
                if self.critical.is_some_and(|c| value <= c) {
                    Some(AlertLevel::Critique)
                } else if self.min.is_some_and(|m| value <= m) {
                    Some(AlertLevel::Attention)
                } else {
                    None
                }
            }
        }
    }

    /// Rejects non-finite bounds and a critical bound that sits on the wrong
    /// side of the warning bound for the indicator's direction.
    pub fn validate(&self, indicator: IndicatorType) -> Result<()> {
        for (field, bound) in [("min", self.min), ("max", self.max), ("critical", self.critical)] {
            if bound.is_some_and(|b| !b.is_finite()) {
                return Err(AppError::validation(field, "threshold bounds must be finite numbers"));
            }
        }

        match (indicator.direction(), self.critical) {
            (Direction::Ceiling, Some(critical)) if self.max.is_some_and(|m| critical < m) => {
                Err(
                    AppError::validation(
                        "critical",
                        format!("{}: critical must be greater than or equal to max", indicator)
                    )
                )
            }
            (Direction::Floor, Some(critical)) if self.min.is_some_and(|m| critical > m) => {
                Err(
                    AppError::validation(
                        "critical",
                        format!("{}: critical must be less than or equal to min", indicator)
                    )
                )
            }
            _ => Ok(()),
        }
    }
}

/// Built-in bounds used when a team has no custom row for the indicator.
pub fn default_bounds(indicator: IndicatorType) -> Bounds {
    match indicator {
        IndicatorType::RcaOverload => Bounds::new(None, Some(1.5), Some(1.8)),
        IndicatorType::RcaUnderload => Bounds::new(Some(0.8), None, Some(0.5)),
        IndicatorType::Monotony => Bounds::new(None, Some(2.0), Some(2.5)),
        IndicatorType::Strain => Bounds::new(None, Some(8000.0), Some(10000.0)),
        IndicatorType::WellnessLow => Bounds::new(Some(5.0), None, Some(3.0)),
        IndicatorType::WellnessHigh => Bounds::new(None, Some(9.0), Some(10.0)),
    }
}

/// A stored team override, as read from the threshold table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOverride {
    pub indicator: IndicatorType,
    pub bounds: Bounds,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdSource {
    Custom,
    Default,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedThreshold {
    Enabled {
        bounds: Bounds,
        source: ThresholdSource,
    },
    /// The team switched this indicator off.
    Disabled,
}

impl ResolvedThreshold {
    pub fn source(&self) -> ThresholdSource {
        match self {
            ResolvedThreshold::Enabled { source, .. } => *source,
            ResolvedThreshold::Disabled => ThresholdSource::Disabled,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            ResolvedThreshold::Enabled { bounds, .. } => Some(*bounds),
            ResolvedThreshold::Disabled => None,
        }
    }
}

pub fn resolve(indicator: IndicatorType, custom: Option<&ThresholdOverride>) -> ResolvedThreshold {
    match custom {
        Some(row) if row.active =>
            ResolvedThreshold::Enabled {
                bounds: row.bounds,
                source: ThresholdSource::Custom,
            },
        Some(_) => ResolvedThreshold::Disabled,
        None =>
            ResolvedThreshold::Enabled {
                bounds: default_bounds(indicator),
                source: ThresholdSource::Default,
            },
    }
}

/// Effective thresholds of one team for every indicator type.
#[derive(Debug, Clone)]
pub struct ThresholdSet {
    resolved: HashMap<IndicatorType, ResolvedThreshold>,
}

impl ThresholdSet {
    pub fn resolve(overrides: &[ThresholdOverride]) -> Self {
        let resolved = IndicatorType::all()
            .iter()
            .map(|indicator| {
                let custom = overrides.iter().find(|o| o.indicator == *indicator);
                (*indicator, resolve(*indicator, custom))
            })
            .collect();

        Self { resolved }
    }

    pub fn defaults() -> Self {
        Self::resolve(&[])
    }

    pub fn get(&self, indicator: IndicatorType) -> ResolvedThreshold {
        self.resolved.get(&indicator).copied().unwrap_or(ResolvedThreshold::Enabled {
            bounds: default_bounds(indicator),
            source: ThresholdSource::Default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_precedence_checks_critical_first() {
        let bounds = default_bounds(IndicatorType::RcaOverload);

        assert_eq!(bounds.breach_level(Direction::Ceiling, 4.0), Some(AlertLevel::Critique));
        assert_eq!(bounds.breach_level(Direction::Ceiling, 1.8), Some(AlertLevel::Critique));
        assert_eq!(bounds.breach_level(Direction::Ceiling, 1.5), Some(AlertLevel::Attention));
        assert_eq!(bounds.breach_level(Direction::Ceiling, 1.49), None);
    }

    #[test]
    fn floor_boundaries_are_inclusive() {
        let bounds = default_bounds(IndicatorType::WellnessLow);

        assert_eq!(bounds.breach_level(Direction::Floor, 5.0), Some(AlertLevel::Attention));
        assert_eq!(bounds.breach_level(Direction::Floor, 3.0), Some(AlertLevel::Critique));
        assert_eq!(bounds.breach_level(Direction::Floor, 6.0), None);
    }

    #[test]
    fn unset_bounds_never_breach() {
        let bounds = Bounds::new(None, None, None);
        assert_eq!(bounds.breach_level(Direction::Ceiling, f64::MAX), None);
        assert_eq!(bounds.breach_level(Direction::Floor, f64::MIN), None);

        let critical_only = Bounds::new(None, None, Some(2.0));
        assert_eq!(critical_only.breach_level(Direction::Ceiling, 1.9), None);
        assert_eq!(critical_only.breach_level(Direction::Ceiling, 2.0), Some(AlertLevel::Critique));
    }

    #[test]
    fn active_override_replaces_default_without_merging() {
        let custom = ThresholdOverride {
            indicator: IndicatorType::RcaOverload,
            bounds: Bounds::new(None, Some(1.2), None),
            active: true,
        };

        let resolved = resolve(IndicatorType::RcaOverload, Some(&custom));
        assert_eq!(resolved.source(), ThresholdSource::Custom);
        // default critical (1.8) is not borrowed
        assert_eq!(resolved.bounds().unwrap().critical, None);
    }

    #[test]
    fn inactive_override_disables_instead_of_falling_back() {
        let custom = ThresholdOverride {
            indicator: IndicatorType::Monotony,
            bounds: Bounds::new(None, Some(1.0), Some(1.5)),
            active: false,
        };

        let set = ThresholdSet::resolve(&[custom]);
        assert_eq!(set.get(IndicatorType::Monotony), ResolvedThreshold::Disabled);
        assert_eq!(set.get(IndicatorType::Strain).source(), ThresholdSource::Default);
    }

    #[test]
    fn validation_rejects_inverted_bounds() {
        assert!(Bounds::new(None, Some(2.0), Some(1.0)).validate(IndicatorType::Monotony).is_err());
        assert!(Bounds::new(Some(3.0), None, Some(5.0)).validate(IndicatorType::WellnessLow).is_err());
        assert!(Bounds::new(None, Some(f64::NAN), None).validate(IndicatorType::Strain).is_err());
        assert!(Bounds::new(Some(0.8), None, Some(0.5)).validate(IndicatorType::RcaUnderload).is_ok());
        assert!(Bounds::default().validate(IndicatorType::RcaOverload).is_ok());
    }
}
