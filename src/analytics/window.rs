//! Trailing-window aggregation of daily training load.
//!
//! Daily load is the sum over a calendar day of `perceived exertion x minutes`
//! for every session the athlete logged. Days without any entry count as zero
//! so that rest days pull the averages down.

use chrono::{ Duration, NaiveDate };

/// Acute window: `[as_of - 6d, as_of]`.
pub const ACUTE_WINDOW_DAYS: usize = 7;

/// Chronic window: `[as_of - 27d, as_of]`.
pub const CHRONIC_WINDOW_DAYS: usize = 28;

/// Load of a single session.
pub fn session_load(perceived_exertion: f64, duration_minutes: i32) -> f64 {
    perceived_exertion * (duration_minutes as f64)
}

/// First calendar day covered by the chronic window ending at `as_of`.
pub fn chronic_window_start(as_of: NaiveDate) -> NaiveDate {
    as_of - Duration::days((CHRONIC_WINDOW_DAYS as i64) - 1)
}

/// Daily load totals for the 28 days ending at `as_of`, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadHistory {
    as_of: NaiveDate,
    daily: [f64; CHRONIC_WINDOW_DAYS],
    entries_in_window: usize,
}

impl LoadHistory {
    /// Buckets `(day, load)` pairs into the chronic window. Several pairs for
    /// the same day are summed; pairs outside the window are ignored.
    pub fn from_session_loads<I>(as_of: NaiveDate, loads: I) -> Self
        where I: IntoIterator<Item = (NaiveDate, f64)>
    {
        let mut daily = [0.0; CHRONIC_WINDOW_DAYS];
        let mut entries_in_window = 0;

        for (day, load) in loads {
            let days_back = (as_of - day).num_days();
            if days_back < 0 || days_back >= (CHRONIC_WINDOW_DAYS as i64) {
                continue;
            }
            let index = CHRONIC_WINDOW_DAYS - 1 - (days_back as usize);
            daily[index] += load;
            entries_in_window += 1;
        }

        Self {
            as_of,
            daily,
            entries_in_window,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Number of effort entries that fell inside the chronic window.
    pub fn entries_in_window(&self) -> usize {
        self.entries_in_window
    }

    /// Daily totals `[d0..d6]` of the acute window, oldest first.
    pub fn acute_series(&self) -> &[f64] {
        &self.daily[CHRONIC_WINDOW_DAYS - ACUTE_WINDOW_DAYS..]
    }

    pub fn chronic_series(&self) -> &[f64] {
        &self.daily
    }

    pub fn acute_load(&self) -> f64 {
        mean(self.acute_series())
    }

    /// `None` when the athlete logged nothing in the chronic window.
    pub fn chronic_load(&self) -> Option<f64> {
        if self.entries_in_window == 0 {
            return None;
        }
        Some(mean(self.chronic_series()))
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / (values.len() as f64)
}

/// Population standard deviation. Identical values yield exactly 0.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let first = values[0];
    if values.iter().all(|v| *v == first) {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values
            .iter()
            .map(|v| (v - avg).powi(2))
            .sum::<f64>() / (values.len() as f64);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn acute_and_chronic_means_count_rest_days_as_zero() {
        let as_of = day(2025, 3, 28);
        let loads = (0..7).map(|i| (as_of - Duration::days(i), 100.0));
        let history = LoadHistory::from_session_loads(as_of, loads);

        assert_eq!(history.acute_load(), 100.0);
        assert_eq!(history.chronic_load(), Some(25.0));
        assert_eq!(history.entries_in_window(), 7);
    }

    #[test]
    fn chronic_load_is_undefined_without_entries() {
        let history = LoadHistory::from_session_loads(day(2025, 3, 28), Vec::new());

        assert_eq!(history.acute_load(), 0.0);
        assert_eq!(history.chronic_load(), None);
    }

    #[test]
    fn same_day_sessions_are_summed() {
        let as_of = day(2025, 3, 28);
        let history = LoadHistory::from_session_loads(as_of, vec![
            (as_of, session_load(6.0, 60)),
            (as_of, session_load(4.5, 40))
        ]);

        assert_eq!(history.acute_series()[6], 360.0 + 180.0);
    }

    #[test]
    fn loads_outside_window_are_ignored() {
        let as_of = day(2025, 3, 28);
        let history = LoadHistory::from_session_loads(as_of, vec![
            (as_of - Duration::days(28), 500.0),
            (as_of + Duration::days(1), 500.0),
            (chronic_window_start(as_of), 280.0)
        ]);

        assert_eq!(history.entries_in_window(), 1);
        assert_eq!(history.chronic_series()[0], 280.0);
        assert_eq!(history.chronic_load(), Some(10.0));
    }

    #[test]
    fn std_dev_uses_population_formula() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-12);
        assert_eq!(population_std_dev(&[50.0; 7]), 0.0);
        assert_eq!(population_std_dev(&[0.0; 7]), 0.0);
    }
}
