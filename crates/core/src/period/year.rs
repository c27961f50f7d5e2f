//! A single fiscal year.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{FiscalDay, FiscalMonth, FiscalQuarter, Period};
use crate::calendar::{context, FiscalCalendar, MAX_QUARTER, MIN_QUARTER, MONTHS_PER_YEAR};
use crate::clock::Clock;
use crate::error::FiscalResult;

/// Fiscal year definition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FiscalYear {
    fiscal_year: i32,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip)]
    calendar: FiscalCalendar,
}

impl FiscalYear {
    /// Creates a fiscal year under the active calendar.
    pub fn new(fiscal_year: i32) -> FiscalResult<Self> {
        Self::with_calendar(fiscal_year, &context::current())
    }

    /// Creates a fiscal year under an explicit calendar.
    pub fn with_calendar(fiscal_year: i32, calendar: &FiscalCalendar) -> FiscalResult<Self> {
        Ok(Self {
            fiscal_year,
            start: calendar.fiscal_year_start(fiscal_year)?,
            end: calendar.fiscal_year_end(fiscal_year)?,
            calendar: *calendar,
        })
    }

    /// Fiscal year containing today.
    pub fn current(clock: &impl Clock) -> FiscalResult<Self> {
        let calendar = context::current();
        Self::with_calendar(calendar.date_to_fiscal_year(clock.today()), &calendar)
    }

    /// Returns the fiscal year number.
    #[must_use]
    pub const fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    /// Calendar this year was built with.
    #[must_use]
    pub const fn calendar(&self) -> FiscalCalendar {
        self.calendar
    }

    /// Number of days in this fiscal year (365 or 366).
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        let days = (self.end.date() - self.start.date()).num_days() + 1;
        u32::try_from(days).unwrap_or_default()
    }

    /// True if the year spans a February 29.
    #[must_use]
    pub fn is_leap(&self) -> bool {
        self.days_in_year() == 366
    }

    /// The year before this one.
    pub fn prev_fiscal_year(&self) -> FiscalResult<Self> {
        Self::with_calendar(self.fiscal_year - 1, &self.calendar)
    }

    /// The year after this one.
    pub fn next_fiscal_year(&self) -> FiscalResult<Self> {
        Self::with_calendar(self.fiscal_year + 1, &self.calendar)
    }

    /// Quarter `quarter` (1..=4) of this year.
    pub fn quarter(&self, quarter: u32) -> FiscalResult<FiscalQuarter> {
        FiscalQuarter::with_calendar(self.fiscal_year, quarter, &self.calendar)
    }

    /// First quarter.
    pub fn q1(&self) -> FiscalResult<FiscalQuarter> {
        self.quarter(1)
    }

    /// Second quarter.
    pub fn q2(&self) -> FiscalResult<FiscalQuarter> {
        self.quarter(2)
    }

    /// Third quarter.
    pub fn q3(&self) -> FiscalResult<FiscalQuarter> {
        self.quarter(3)
    }

    /// Fourth quarter.
    pub fn q4(&self) -> FiscalResult<FiscalQuarter> {
        self.quarter(4)
    }

    /// The four quarters, built lazily.
    pub fn quarters(&self) -> impl Iterator<Item = FiscalQuarter> + '_ {
        (MIN_QUARTER..=MAX_QUARTER).filter_map(|q| self.quarter(q).ok())
    }

    /// Fiscal month `fiscal_month` (1..=12) of this year.
    pub fn month(&self, fiscal_month: u32) -> FiscalResult<FiscalMonth> {
        FiscalMonth::with_calendar(self.fiscal_year, fiscal_month, &self.calendar)
    }

    /// The twelve months, built lazily.
    pub fn months(&self) -> impl Iterator<Item = FiscalMonth> + '_ {
        (1..=MONTHS_PER_YEAR).filter_map(|m| self.month(m).ok())
    }

    /// Fiscal day `fiscal_day` of this year.
    pub fn day(&self, fiscal_day: u32) -> FiscalResult<FiscalDay> {
        FiscalDay::with_calendar(self.fiscal_year, fiscal_day, &self.calendar)
    }

    /// Every day of the year, built lazily.
    pub fn days(&self) -> impl Iterator<Item = FiscalDay> + '_ {
        (1..=self.days_in_year()).filter_map(|d| self.day(d).ok())
    }
}

impl Period for FiscalYear {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl PartialEq for FiscalYear {
    fn eq(&self, other: &Self) -> bool {
        self.fiscal_year == other.fiscal_year
    }
}

impl Eq for FiscalYear {}

impl Hash for FiscalYear {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fiscal_year.hash(state);
    }
}

impl PartialOrd for FiscalYear {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by fiscal year number, consistent with `Eq`.
///
/// Under a single calendar this is the same as ordering by start instant.
/// Values built under different calendars still compare by key, not by
/// where their boundaries fall.
impl Ord for FiscalYear {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fiscal_year.cmp(&other.fiscal_year)
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.fiscal_year)
    }
}
