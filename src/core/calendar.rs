//! In-game calendar anchored to February 2nd, 993
//!
//! One cultivation tick is one in-game day, so every `SECONDS_PER_TICK`
//! of wall-clock time advances the calendar by a day.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::types::Timestamp;
use crate::simulation::tick::SECONDS_PER_TICK;

/// Days in an in-game year (used for age and lifespan display)
pub const DAYS_PER_YEAR: f64 = 365.0;

fn calendar_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(993, 2, 2).unwrap_or(NaiveDate::MIN)
}

/// Calendar maps wall-clock timestamps onto in-game dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCalendar {
    start_timestamp: Timestamp,
}

impl GameCalendar {
    pub fn new(start_timestamp: Timestamp) -> Self {
        Self { start_timestamp }
    }

    pub fn start_timestamp(&self) -> Timestamp {
        self.start_timestamp
    }

    /// Whole in-game days since the calendar started (0 before the start)
    pub fn days_since_start(&self, timestamp: Timestamp) -> u64 {
        (timestamp - self.start_timestamp).max(0) as u64 / SECONDS_PER_TICK as u64
    }

    pub fn date_for_timestamp(&self, timestamp: Timestamp) -> NaiveDate {
        let epoch = calendar_epoch();
        epoch
            .checked_add_days(Days::new(self.days_since_start(timestamp)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Render a date like "February 2nd, 993"
    pub fn format_date(&self, timestamp: Timestamp) -> String {
        let date = self.date_for_timestamp(timestamp);
        format!(
            "{} {}, {}",
            date.format("%B"),
            ordinal(date.day()),
            date.year()
        )
    }

    /// Fractional in-game days between two timestamps (never negative)
    pub fn days_elapsed(&self, start: Timestamp, end: Timestamp) -> f64 {
        (end - start).max(0) as f64 / SECONDS_PER_TICK as f64
    }

    pub fn years_elapsed(&self, start: Timestamp, end: Timestamp) -> f64 {
        self.days_elapsed(start, end) / DAYS_PER_YEAR
    }
}

/// English ordinal for a positive number: 1st, 2nd, 3rd, 4th, 11th, 21st
pub fn ordinal(n: u32) -> String {
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(112), "112th");
    }

    #[test]
    fn test_calendar_starts_on_epoch() {
        let cal = GameCalendar::new(1_000);
        assert_eq!(cal.format_date(1_000), "February 2nd, 993");
        // Before the start the calendar stays on day zero
        assert_eq!(cal.format_date(0), "February 2nd, 993");
    }

    #[test]
    fn test_calendar_advances_one_day_per_tick() {
        let cal = GameCalendar::new(0);
        assert_eq!(cal.days_since_start(59), 0);
        assert_eq!(cal.days_since_start(60), 1);
        assert_eq!(cal.format_date(60), "February 3rd, 993");

        // 27 days later rolls into March (993 is not a leap year)
        assert_eq!(cal.format_date(27 * 60), "March 1st, 993");
    }

    #[test]
    fn test_days_elapsed_is_fractional_and_clamped() {
        let cal = GameCalendar::new(0);
        assert!((cal.days_elapsed(0, 90) - 1.5).abs() < 1e-9);
        assert_eq!(cal.days_elapsed(100, 50), 0.0);
        assert!((cal.years_elapsed(0, 365 * 60) - 1.0).abs() < 1e-9);
    }
}
