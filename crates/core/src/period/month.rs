//! A single fiscal month.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{fiscal_day_span, FiscalDay, FiscalQuarter, Period};
use crate::calendar::arithmetic::quarter_of_month;
use crate::calendar::{context, FiscalCalendar, MONTHS_PER_YEAR};
use crate::clock::Clock;
use crate::error::FiscalResult;

/// One fiscal month, mapped onto a calendar month offset from the start month.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FiscalMonth {
    fiscal_year: i32,
    fiscal_month: u32,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip)]
    calendar: FiscalCalendar,
}

impl FiscalMonth {
    /// Creates a fiscal month under the active calendar.
    pub fn new(fiscal_year: i32, fiscal_month: u32) -> FiscalResult<Self> {
        Self::with_calendar(fiscal_year, fiscal_month, &context::current())
    }

    /// Creates a fiscal month under an explicit calendar.
    pub fn with_calendar(
        fiscal_year: i32,
        fiscal_month: u32,
        calendar: &FiscalCalendar,
    ) -> FiscalResult<Self> {
        Ok(Self {
            fiscal_year,
            fiscal_month,
            start: calendar.month_start(fiscal_year, fiscal_month)?,
            end: calendar.month_end(fiscal_year, fiscal_month)?,
            calendar: *calendar,
        })
    }

    /// Fiscal month containing today.
    pub fn current(clock: &impl Clock) -> FiscalResult<Self> {
        let calendar = context::current();
        let (fiscal_year, fiscal_month) = calendar.date_to_fiscal_month(clock.today());
        Self::with_calendar(fiscal_year, fiscal_month, &calendar)
    }

    /// Returns the fiscal year number.
    #[must_use]
    pub const fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    /// Returns the fiscal month number (1..=12).
    #[must_use]
    pub const fn fiscal_month(&self) -> u32 {
        self.fiscal_month
    }

    /// Returns the quarter number this month falls in.
    #[must_use]
    pub const fn fiscal_quarter(&self) -> u32 {
        quarter_of_month(self.fiscal_month)
    }

    /// Calendar this month was built with.
    #[must_use]
    pub const fn calendar(&self) -> FiscalCalendar {
        self.calendar
    }

    /// The quarter this month belongs to.
    pub fn quarter(&self) -> FiscalResult<FiscalQuarter> {
        FiscalQuarter::with_calendar(self.fiscal_year, self.fiscal_quarter(), &self.calendar)
    }

    /// The previous fiscal month; month 1 rolls back to month 12 of the previous year.
    pub fn prev_fiscal_month(&self) -> FiscalResult<Self> {
        let (fiscal_year, fiscal_month) = if self.fiscal_month == 1 {
            (self.fiscal_year - 1, MONTHS_PER_YEAR)
        } else {
            (self.fiscal_year, self.fiscal_month - 1)
        };
        Self::with_calendar(fiscal_year, fiscal_month, &self.calendar)
    }

    /// The next fiscal month; month 12 rolls over to month 1 of the next year.
    pub fn next_fiscal_month(&self) -> FiscalResult<Self> {
        let (fiscal_year, fiscal_month) = if self.fiscal_month == MONTHS_PER_YEAR {
            (self.fiscal_year + 1, 1)
        } else {
            (self.fiscal_year, self.fiscal_month + 1)
        };
        Self::with_calendar(fiscal_year, fiscal_month, &self.calendar)
    }

    /// Every day of this month, built lazily.
    pub fn days(&self) -> impl Iterator<Item = FiscalDay> + '_ {
        fiscal_day_span(&self.calendar, self.start, self.end)
            .filter_map(|d| FiscalDay::with_calendar(self.fiscal_year, d, &self.calendar).ok())
    }
}

impl Period for FiscalMonth {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl PartialEq for FiscalMonth {
    fn eq(&self, other: &Self) -> bool {
        (self.fiscal_year, self.fiscal_month) == (other.fiscal_year, other.fiscal_month)
    }
}

impl Eq for FiscalMonth {}

impl Hash for FiscalMonth {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.fiscal_year, self.fiscal_month).hash(state);
    }
}

impl PartialOrd for FiscalMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by (fiscal year, fiscal month), consistent with `Eq`.
///
/// Under a single calendar this is the same as ordering by start instant.
/// Values built under different calendars still compare by key, not by
/// where their boundaries fall.
impl Ord for FiscalMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fiscal_year, self.fiscal_month).cmp(&(other.fiscal_year, other.fiscal_month))
    }
}

impl std::fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{} FM{}", self.fiscal_year, self.fiscal_month)
    }
}
