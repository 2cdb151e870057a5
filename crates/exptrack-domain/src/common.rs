//! Shared date utilities for ledger queries and aggregations.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical text form for calendar dates, both on disk and on screen.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateWindowError {
    #[error("window end {end} is before start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Inclusive `[start, end]` range of calendar dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end < start {
            return Err(DateWindowError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Widest window that still renders as four-digit ISO years.
    pub fn all_time() -> Self {
        let start = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Calendar month that contains `reference`.
    pub fn month_containing(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        let (year, month) = if reference.month() == 12 {
            (reference.year() + 1, 1)
        } else {
            (reference.year(), reference.month() + 1)
        };
        let end = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(reference);
        Self { start, end }
    }

    /// `[reference - days, reference]`, clamped at the earliest representable date.
    pub fn trailing_days(reference: NaiveDate, days: u32) -> Self {
        let start = reference
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start,
            end: reference,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_rejects_reversed_bounds() {
        let err = DateWindow::new(date(2024, 3, 2), date(2024, 3, 1)).unwrap_err();
        assert!(err.to_string().contains("before start"));
    }

    #[test]
    fn single_day_window_is_inclusive() {
        let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 1)).unwrap();
        assert!(window.contains(date(2024, 3, 1)));
        assert!(!window.contains(date(2024, 3, 2)));
    }

    #[test]
    fn month_containing_handles_december_and_leap_years() {
        let december = DateWindow::month_containing(date(2023, 12, 15));
        assert_eq!(december.start, date(2023, 12, 1));
        assert_eq!(december.end, date(2023, 12, 31));

        let february = DateWindow::month_containing(date(2024, 2, 10));
        assert_eq!(february.end, date(2024, 2, 29));
    }

    #[test]
    fn trailing_days_spans_reference_inclusive() {
        let window = DateWindow::trailing_days(date(2024, 3, 31), 30);
        assert_eq!(window.start, date(2024, 3, 1));
        assert_eq!(window.end, date(2024, 3, 31));
    }

    #[test]
    fn all_time_renders_four_digit_years() {
        let window = DateWindow::all_time();
        assert_eq!(window.start.format(DATE_FORMAT).to_string(), "0001-01-01");
        assert_eq!(window.end.format(DATE_FORMAT).to_string(), "9999-12-31");
    }
}
