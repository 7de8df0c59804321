use chrono::{Local, NaiveDate};

use dinario_domain::MonthRange;

/// ISO calendar-day format used for every stored date.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Clock abstracts access to the current day so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current calendar day.
    fn today(&self) -> NaiveDate;

    /// Returns the month containing `today()`. Defaults to [`MonthRange::containing`].
    fn current_month_range(&self) -> MonthRange {
        MonthRange::containing(self.today())
    }
}

/// Real-time clock backed by the local system time, truncated to the day.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Today's date according to the system clock.
pub fn today() -> NaiveDate {
    SystemClock.today()
}

/// First and last day of the current month according to the system clock.
pub fn current_month_range() -> MonthRange {
    SystemClock.current_month_range()
}

/// Renders a date as `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
