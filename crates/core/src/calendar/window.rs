//! Calendar month boundaries and the Sunday-started display grid.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// A year/month pair that does not name a real calendar month.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid month: {year}-{month}")]
pub struct InvalidMonth {
    pub year: i32,
    pub month: u32,
}

/// Inclusive date range covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthWindow {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl MonthWindow {
    /// Build the window for `year`/`month` (month is 1-12).
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        let invalid = || InvalidMonth { year, month };

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last_day = next_month
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// The window containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, InvalidMonth> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// First day in the catalog's date format (YYYY-MM-DD).
    pub fn start_param(&self) -> String {
        self.first_day.format("%Y-%m-%d").to_string()
    }

    /// Last day in the catalog's date format (YYYY-MM-DD).
    pub fn end_param(&self) -> String {
        self.last_day.format("%Y-%m-%d").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// Days shown in a 7-column grid starting on Sunday.
    ///
    /// Runs from the Sunday on or before the first day to the Saturday on or
    /// after the last day, so the length is always a multiple of 7.
    pub fn grid_days(&self) -> Vec<NaiveDate> {
        let lead = u64::from(self.first_day.weekday().num_days_from_sunday());
        let trail = 6 - u64::from(self.last_day.weekday().num_days_from_sunday());

        let start = self
            .first_day
            .checked_sub_days(Days::new(lead))
            .unwrap_or(self.first_day);
        let end = self
            .last_day
            .checked_add_days(Days::new(trail))
            .unwrap_or(self.last_day);

        start.iter_days().take_while(|d| *d <= end).collect()
    }
}
