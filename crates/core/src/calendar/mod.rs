//! Fiscal calendar convention and the active-calendar context.
//!
//! A [`FiscalCalendar`] is the validated (start_year, start_month, start_day)
//! triple. All period arithmetic lives on it (see [`arithmetic`]); the
//! [`context`] module keeps the calendar that ambient constructors such as
//! `FiscalYear::new` use.

pub mod arithmetic;
pub mod context;

use chrono::{Datelike, NaiveDate};
use fiscal_shared::{CalendarSettings, StartYear};
use serde::{Deserialize, Serialize};

use crate::error::{FiscalError, FiscalResult};

/// Months in a fiscal year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Months in a fiscal quarter.
pub const MONTHS_PER_QUARTER: u32 = MONTHS_PER_YEAR / 4;

/// First valid quarter number.
pub const MIN_QUARTER: u32 = 1;

/// Last valid quarter number.
pub const MAX_QUARTER: u32 = 4;

/// Earliest supported fiscal year.
pub const MIN_FISCAL_YEAR: i32 = 1;

/// Latest supported fiscal year.
pub const MAX_FISCAL_YEAR: i32 = 9999;

/// Non-leap year used to validate start days (Feb 29 is never a valid start).
pub(crate) const REFERENCE_YEAR: i32 = 2001;

/// A validated fiscal-year start convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CalendarSettings", into = "CalendarSettings")]
pub struct FiscalCalendar {
    start_year: StartYear,
    start_month: u32,
    start_day: u32,
}

/// Partial calendar; `None` fields inherit from the calendar it is applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarOverrides {
    /// Override for the start year convention.
    pub start_year: Option<StartYear>,
    /// Override for the first month of the fiscal year.
    pub start_month: Option<u32>,
    /// Override for the first day of the first month.
    pub start_day: Option<u32>,
}

impl CalendarOverrides {
    /// Creates an empty set of overrides.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start_year: None,
            start_month: None,
            start_day: None,
        }
    }

    /// Sets the start year convention.
    #[must_use]
    pub const fn start_year(mut self, start_year: StartYear) -> Self {
        self.start_year = Some(start_year);
        self
    }

    /// Sets the first month.
    #[must_use]
    pub const fn start_month(mut self, start_month: u32) -> Self {
        self.start_month = Some(start_month);
        self
    }

    /// Sets the first day.
    #[must_use]
    pub const fn start_day(mut self, start_day: u32) -> Self {
        self.start_day = Some(start_day);
        self
    }
}

impl FiscalCalendar {
    /// U.S. federal government convention: FY N runs Oct 1 (N-1) to Sep 30 N.
    pub const US_FEDERAL: Self = Self {
        start_year: StartYear::Previous,
        start_month: 10,
        start_day: 1,
    };

    /// UK personal tax convention: FY N runs Apr 6 N to Apr 5 (N+1).
    pub const UK_PERSONAL: Self = Self {
        start_year: StartYear::Same,
        start_month: 4,
        start_day: 6,
    };

    /// Creates a calendar, validating the start month and day.
    ///
    /// `start_day` is checked against a non-leap year, so February accepts
    /// at most 28.
    pub fn new(start_year: StartYear, start_month: u32, start_day: u32) -> FiscalResult<Self> {
        if !(1..=MONTHS_PER_YEAR).contains(&start_month) {
            return Err(FiscalError::InvalidConfig(format!(
                "start_month must be in 1..={MONTHS_PER_YEAR}, got {start_month}"
            )));
        }

        let max_day = days_in_month(REFERENCE_YEAR, start_month).ok_or_else(|| {
            FiscalError::InvalidConfig(format!("start_month {start_month} has no days"))
        })?;
        if !(1..=max_day).contains(&start_day) {
            return Err(FiscalError::InvalidConfig(format!(
                "start_day must be in 1..={max_day} for month {start_month}, got {start_day}"
            )));
        }

        Ok(Self {
            start_year,
            start_month,
            start_day,
        })
    }

    /// Returns the start year convention.
    #[must_use]
    pub const fn start_year(&self) -> StartYear {
        self.start_year
    }

    /// Returns the first month of the fiscal year.
    #[must_use]
    pub const fn start_month(&self) -> u32 {
        self.start_month
    }

    /// Returns the first day of the first month.
    #[must_use]
    pub const fn start_day(&self) -> u32 {
        self.start_day
    }

    /// Returns a new calendar with the given fields replaced.
    pub fn with_overrides(&self, overrides: CalendarOverrides) -> FiscalResult<Self> {
        Self::new(
            overrides.start_year.unwrap_or(self.start_year),
            overrides.start_month.unwrap_or(self.start_month),
            overrides.start_day.unwrap_or(self.start_day),
        )
    }
}

impl Default for FiscalCalendar {
    fn default() -> Self {
        Self::US_FEDERAL
    }
}

impl TryFrom<CalendarSettings> for FiscalCalendar {
    type Error = FiscalError;

    fn try_from(settings: CalendarSettings) -> Result<Self, Self::Error> {
        Self::new(settings.start_year, settings.start_month, settings.start_day)
    }
}

impl From<FiscalCalendar> for CalendarSettings {
    fn from(calendar: FiscalCalendar) -> Self {
        Self {
            start_year: calendar.start_year,
            start_month: calendar.start_month,
            start_day: calendar.start_day,
        }
    }
}

/// Returns the number of days in a calendar month.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month.and_then(|d| d.pred_opt()).map(|d| d.day())
}
