//! Pure load and wellness analytics: no I/O happens below this module.

pub mod window;
pub mod indicators;
pub mod thresholds;
pub mod rules;

pub use indicators::IndicatorSnapshot;
pub use rules::{ Breach, Outcome, RuleOutcome };
pub use thresholds::{ Bounds, ResolvedThreshold, ThresholdOverride, ThresholdSet, ThresholdSource };
pub use window::LoadHistory;
