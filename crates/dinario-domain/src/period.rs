//! Calendar-month reporting windows.

use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// First and last calendar day of a month, both inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    /// Returns the month that contains `date`.
    ///
    /// The last day is the day before the first of the following month, so
    /// month length and leap years come from the calendar itself.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date - Duration::days(i64::from(date.day0()));
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Inclusive on both ends: a record dated on the last day belongs to this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The month preceding this one.
    pub fn previous(&self) -> Self {
        match self.start.pred_opt() {
            Some(last_of_previous) => Self::containing(last_of_previous),
            None => *self,
        }
    }

    /// Human readable label such as `February 2026`.
    pub fn label(&self) -> String {
        self.start.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
