//! Calendar dates and datetimes that answer fiscal questions.
//!
//! Unlike the period types, these wrappers do not cache anything: every
//! fiscal attribute is computed against the calendar active at the moment
//! it is asked for.

use std::ops::Deref;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::context;
use crate::clock::Clock;
use crate::error::FiscalResult;
use crate::period::{last_second, FiscalDay, FiscalMonth, FiscalQuarter, FiscalYear, Period};

/// Fiscal attributes of anything with a calendar date.
///
/// All methods read [`context::current`] when called.
pub trait FiscalDatelike {
    /// The calendar date being classified.
    fn calendar_date(&self) -> NaiveDate;

    /// Fiscal year containing the date.
    fn fiscal_year(&self) -> i32 {
        context::current().date_to_fiscal_year(self.calendar_date())
    }

    /// Quarter number (1..=4).
    fn fiscal_quarter(&self) -> u32 {
        context::current().date_to_fiscal_quarter(self.calendar_date()).1
    }

    /// Fiscal month number (1..=12).
    fn fiscal_month(&self) -> u32 {
        context::current().date_to_fiscal_month(self.calendar_date()).1
    }

    /// 1-based day of the fiscal year.
    fn fiscal_day(&self) -> FiscalResult<u32> {
        Ok(context::current().date_to_fiscal_day(self.calendar_date())?.1)
    }

    /// The fiscal year before the one containing the date.
    fn prev_fiscal_year(&self) -> FiscalResult<FiscalYear> {
        FiscalYear::new(self.fiscal_year() - 1)
    }

    /// The fiscal year after the one containing the date.
    fn next_fiscal_year(&self) -> FiscalResult<FiscalYear> {
        FiscalYear::new(self.fiscal_year() + 1)
    }

    /// The quarter before the one containing the date.
    fn prev_fiscal_quarter(&self) -> FiscalResult<FiscalQuarter> {
        let calendar = context::current();
        let (fiscal_year, quarter) = calendar.date_to_fiscal_quarter(self.calendar_date());
        FiscalQuarter::with_calendar(fiscal_year, quarter, &calendar)?.prev_fiscal_quarter()
    }

    /// The quarter after the one containing the date.
    fn next_fiscal_quarter(&self) -> FiscalResult<FiscalQuarter> {
        let calendar = context::current();
        let (fiscal_year, quarter) = calendar.date_to_fiscal_quarter(self.calendar_date());
        FiscalQuarter::with_calendar(fiscal_year, quarter, &calendar)?.next_fiscal_quarter()
    }

    /// The fiscal month before the one containing the date.
    fn prev_fiscal_month(&self) -> FiscalResult<FiscalMonth> {
        let calendar = context::current();
        let (fiscal_year, month) = calendar.date_to_fiscal_month(self.calendar_date());
        FiscalMonth::with_calendar(fiscal_year, month, &calendar)?.prev_fiscal_month()
    }

    /// The fiscal month after the one containing the date.
    fn next_fiscal_month(&self) -> FiscalResult<FiscalMonth> {
        let calendar = context::current();
        let (fiscal_year, month) = calendar.date_to_fiscal_month(self.calendar_date());
        FiscalMonth::with_calendar(fiscal_year, month, &calendar)?.next_fiscal_month()
    }

    /// The day before, as a fiscal day.
    fn prev_fiscal_day(&self) -> FiscalResult<FiscalDay> {
        let calendar = context::current();
        let (fiscal_year, day) = calendar.date_to_fiscal_day(self.calendar_date())?;
        FiscalDay::with_calendar(fiscal_year, day, &calendar)?.prev_fiscal_day()
    }

    /// The day after, as a fiscal day.
    fn next_fiscal_day(&self) -> FiscalResult<FiscalDay> {
        let calendar = context::current();
        let (fiscal_year, day) = calendar.date_to_fiscal_day(self.calendar_date())?;
        FiscalDay::with_calendar(fiscal_year, day, &calendar)?.next_fiscal_day()
    }
}

/// A calendar date with fiscal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalDate(NaiveDate);

impl FiscalDate {
    /// Returns `None` for dates chrono cannot represent.
    #[must_use]
    pub fn from_ymd_opt(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today according to `clock`.
    pub fn today(clock: &impl Clock) -> Self {
        Self(clock.today())
    }

    /// Wrapped calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FiscalDatelike for FiscalDate {
    fn calendar_date(&self) -> NaiveDate {
        self.0
    }
}

impl Period for FiscalDate {
    fn start(&self) -> NaiveDateTime {
        self.0.start()
    }

    fn end(&self) -> NaiveDateTime {
        last_second(self.0)
    }
}

impl Deref for FiscalDate {
    type Target = NaiveDate;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<NaiveDate> for FiscalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<FiscalDate> for NaiveDate {
    fn from(date: FiscalDate) -> Self {
        date.0
    }
}

impl std::fmt::Display for FiscalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A calendar datetime with fiscal attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiscalDateTime(NaiveDateTime);

impl FiscalDateTime {
    /// Returns `None` for invalid dates or times.
    #[must_use]
    pub fn from_ymd_hms_opt(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)
            .map(Self)
    }

    /// Now according to `clock`.
    pub fn now(clock: &impl Clock) -> Self {
        Self(clock.now())
    }

    /// Wrapped calendar datetime.
    #[must_use]
    pub const fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl FiscalDatelike for FiscalDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl Period for FiscalDateTime {
    fn start(&self) -> NaiveDateTime {
        self.0
    }

    fn end(&self) -> NaiveDateTime {
        self.0
    }
}

impl Deref for FiscalDateTime {
    type Target = NaiveDateTime;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<NaiveDateTime> for FiscalDateTime {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }
}

impl From<FiscalDateTime> for NaiveDateTime {
    fn from(datetime: FiscalDateTime) -> Self {
        datetime.0
    }
}

impl std::fmt::Display for FiscalDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
