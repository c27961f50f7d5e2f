//! A single fiscal quarter.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{fiscal_day_span, FiscalDay, FiscalMonth, FiscalYear, Period};
use crate::calendar::{context, FiscalCalendar, MAX_QUARTER, MIN_QUARTER, MONTHS_PER_QUARTER};
use crate::clock::Clock;
use crate::error::FiscalResult;

/// A quarter (three fiscal months) of a fiscal year.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FiscalQuarter {
    fiscal_year: i32,
    quarter: u32,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip)]
    calendar: FiscalCalendar,
}

impl FiscalQuarter {
    /// Creates a quarter under the active calendar.
    pub fn new(fiscal_year: i32, quarter: u32) -> FiscalResult<Self> {
        Self::with_calendar(fiscal_year, quarter, &context::current())
    }

    /// Creates a quarter under an explicit calendar.
    pub fn with_calendar(
        fiscal_year: i32,
        quarter: u32,
        calendar: &FiscalCalendar,
    ) -> FiscalResult<Self> {
        Ok(Self {
            fiscal_year,
            quarter,
            start: calendar.quarter_start(fiscal_year, quarter)?,
            end: calendar.quarter_end(fiscal_year, quarter)?,
            calendar: *calendar,
        })
    }

    /// Quarter containing today.
    pub fn current(clock: &impl Clock) -> FiscalResult<Self> {
        let calendar = context::current();
        let (fiscal_year, quarter) = calendar.date_to_fiscal_quarter(clock.today());
        Self::with_calendar(fiscal_year, quarter, &calendar)
    }

    /// Returns the fiscal year number.
    #[must_use]
    pub const fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    /// Returns the quarter number (1..=4).
    #[must_use]
    pub const fn quarter(&self) -> u32 {
        self.quarter
    }

    /// Calendar this quarter was built with.
    #[must_use]
    pub const fn calendar(&self) -> FiscalCalendar {
        self.calendar
    }

    /// The fiscal year this quarter belongs to.
    pub fn year(&self) -> FiscalResult<FiscalYear> {
        FiscalYear::with_calendar(self.fiscal_year, &self.calendar)
    }

    /// The previous quarter; Q1 rolls back to Q4 of the previous year.
    pub fn prev_fiscal_quarter(&self) -> FiscalResult<Self> {
        let (fiscal_year, quarter) = if self.quarter == MIN_QUARTER {
            (self.fiscal_year - 1, MAX_QUARTER)
        } else {
            (self.fiscal_year, self.quarter - 1)
        };
        Self::with_calendar(fiscal_year, quarter, &self.calendar)
    }

    /// The next quarter; Q4 rolls over to Q1 of the next year.
    pub fn next_fiscal_quarter(&self) -> FiscalResult<Self> {
        let (fiscal_year, quarter) = if self.quarter == MAX_QUARTER {
            (self.fiscal_year + 1, MIN_QUARTER)
        } else {
            (self.fiscal_year, self.quarter + 1)
        };
        Self::with_calendar(fiscal_year, quarter, &self.calendar)
    }

    /// The three fiscal months of this quarter, built lazily.
    pub fn months(&self) -> impl Iterator<Item = FiscalMonth> + '_ {
        let first = (self.quarter - 1) * MONTHS_PER_QUARTER + 1;
        (first..first + MONTHS_PER_QUARTER)
            .filter_map(|m| FiscalMonth::with_calendar(self.fiscal_year, m, &self.calendar).ok())
    }

    /// Every day of this quarter, built lazily.
    pub fn days(&self) -> impl Iterator<Item = FiscalDay> + '_ {
        fiscal_day_span(&self.calendar, self.start, self.end)
            .filter_map(|d| FiscalDay::with_calendar(self.fiscal_year, d, &self.calendar).ok())
    }
}

impl Period for FiscalQuarter {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl PartialEq for FiscalQuarter {
    fn eq(&self, other: &Self) -> bool {
        (self.fiscal_year, self.quarter) == (other.fiscal_year, other.quarter)
    }
}

impl Eq for FiscalQuarter {}

impl Hash for FiscalQuarter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.fiscal_year, self.quarter).hash(state);
    }
}

impl PartialOrd for FiscalQuarter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by (fiscal year, quarter), consistent with `Eq`.
///
/// Under a single calendar this is the same as ordering by start instant.
/// Values built under different calendars still compare by key, not by
/// where their boundaries fall.
impl Ord for FiscalQuarter {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fiscal_year, self.quarter).cmp(&(other.fiscal_year, other.quarter))
    }
}

impl std::fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{} Q{}", self.fiscal_year, self.quarter)
    }
}
