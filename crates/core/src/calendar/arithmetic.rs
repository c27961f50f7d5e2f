//! Period arithmetic: mapping dates to fiscal periods and back.
//!
//! Every boundary is derived from the fiscal-year start by advancing whole
//! calendar months from it. Month advancing clamps to the last day of the
//! target month (Jan 31 + 1 month = Feb 28/29), so a start day of 31 never
//! fails in a 30-day month. Period ends are the last second of the day before
//! the next period starts.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

use super::{
    FiscalCalendar, MAX_FISCAL_YEAR, MAX_QUARTER, MIN_FISCAL_YEAR, MIN_QUARTER,
    MONTHS_PER_QUARTER, MONTHS_PER_YEAR,
};
use crate::error::{FiscalError, FiscalResult};

/// Most days a fiscal year can have.
pub const MAX_FISCAL_DAY: u32 = 366;

impl FiscalCalendar {
    /// Returns midnight of the first day of the fiscal year.
    pub fn fiscal_year_start(&self, fiscal_year: i32) -> FiscalResult<NaiveDateTime> {
        self.boundary_start(fiscal_year, 0)
    }

    /// Returns 23:59:59 of the last day of the fiscal year.
    pub fn fiscal_year_end(&self, fiscal_year: i32) -> FiscalResult<NaiveDateTime> {
        self.boundary_end(fiscal_year, MONTHS_PER_YEAR)
    }

    /// Returns the start of a fiscal quarter.
    pub fn quarter_start(&self, fiscal_year: i32, quarter: u32) -> FiscalResult<NaiveDateTime> {
        check_quarter(quarter)?;
        self.boundary_start(fiscal_year, (quarter - 1) * MONTHS_PER_QUARTER)
    }

    /// Returns the end of a fiscal quarter.
    pub fn quarter_end(&self, fiscal_year: i32, quarter: u32) -> FiscalResult<NaiveDateTime> {
        check_quarter(quarter)?;
        self.boundary_end(fiscal_year, quarter * MONTHS_PER_QUARTER)
    }

    /// Returns the start of a fiscal month.
    pub fn month_start(&self, fiscal_year: i32, fiscal_month: u32) -> FiscalResult<NaiveDateTime> {
        check_fiscal_month(fiscal_month)?;
        self.boundary_start(fiscal_year, fiscal_month - 1)
    }

    /// Returns the end of a fiscal month.
    pub fn month_end(&self, fiscal_year: i32, fiscal_month: u32) -> FiscalResult<NaiveDateTime> {
        check_fiscal_month(fiscal_month)?;
        self.boundary_end(fiscal_year, fiscal_month)
    }

    /// Returns the start of a fiscal day.
    pub fn day_start(&self, fiscal_year: i32, fiscal_day: u32) -> FiscalResult<NaiveDateTime> {
        let date = self.fiscal_day_date(fiscal_year, fiscal_day)?;
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| outside_calendar(fiscal_year))
    }

    /// Returns the end of a fiscal day.
    pub fn day_end(&self, fiscal_year: i32, fiscal_day: u32) -> FiscalResult<NaiveDateTime> {
        let date = self.fiscal_day_date(fiscal_year, fiscal_day)?;
        date.and_hms_opt(23, 59, 59)
            .ok_or_else(|| outside_calendar(fiscal_year))
    }

    /// Returns the calendar date of a fiscal day.
    pub fn fiscal_day_date(&self, fiscal_year: i32, fiscal_day: u32) -> FiscalResult<NaiveDate> {
        self.check_fiscal_day(fiscal_year, fiscal_day)?;
        self.advance_months(fiscal_year, 0)?
            .checked_add_days(Days::new(u64::from(fiscal_day - 1)))
            .ok_or_else(|| outside_calendar(fiscal_year))
    }

    /// Returns 365 or 366.
    pub fn days_in_fiscal_year(&self, fiscal_year: i32) -> FiscalResult<u32> {
        let start = self.advance_months(fiscal_year, 0)?;
        let next_start = self.advance_months(fiscal_year, MONTHS_PER_YEAR)?;

        u32::try_from((next_start - start).num_days()).map_err(|_| outside_calendar(fiscal_year))
    }

    /// Returns true if the fiscal year spans a February 29.
    pub fn is_leap(&self, fiscal_year: i32) -> FiscalResult<bool> {
        Ok(self.days_in_fiscal_year(fiscal_year)? == MAX_FISCAL_DAY)
    }

    /// Returns the fiscal year containing `date`.
    ///
    /// The start day is always valid in the start month, so comparing
    /// (month, day) against the start is enough; no boundary needs building.
    pub fn date_to_fiscal_year(&self, date: NaiveDate) -> i32 {
        let calendar_year = if (date.month(), date.day()) >= (self.start_month, self.start_day) {
            date.year()
        } else {
            date.year() - 1
        };

        self.start_year.fiscal_year_of(calendar_year)
    }

    /// Returns `(fiscal_year, quarter)` for `date`.
    pub fn date_to_fiscal_quarter(&self, date: NaiveDate) -> (i32, u32) {
        let (fiscal_year, fiscal_month) = self.date_to_fiscal_month(date);
        (fiscal_year, quarter_of_month(fiscal_month))
    }

    /// Returns `(fiscal_year, fiscal_month)` for `date`.
    pub fn date_to_fiscal_month(&self, date: NaiveDate) -> (i32, u32) {
        let fiscal_year = self.date_to_fiscal_year(date);

        let mut offset = (date.month() + MONTHS_PER_YEAR - self.start_month) % MONTHS_PER_YEAR;
        if !self.reached_month_start(date) {
            offset = (offset + MONTHS_PER_YEAR - 1) % MONTHS_PER_YEAR;
        }

        (fiscal_year, offset + 1)
    }

    /// Returns `(fiscal_year, fiscal_day)` for `date`; fiscal days are 1-based.
    pub fn date_to_fiscal_day(&self, date: NaiveDate) -> FiscalResult<(i32, u32)> {
        let fiscal_year = self.date_to_fiscal_year(date);
        let start = self.advance_months(fiscal_year, 0)?;

        let fiscal_day = u32::try_from((date - start).num_days() + 1)
            .map_err(|_| outside_calendar(fiscal_year))?;

        Ok((fiscal_year, fiscal_day))
    }

    /// Validates a fiscal day against the actual length of its year.
    pub(crate) fn check_fiscal_day(&self, fiscal_year: i32, fiscal_day: u32) -> FiscalResult<()> {
        if !(1..=MAX_FISCAL_DAY).contains(&fiscal_day) {
            return Err(FiscalError::invalid_period(
                "fiscal day",
                fiscal_day,
                1,
                i64::from(MAX_FISCAL_DAY),
            ));
        }

        let days_in_year = self.days_in_fiscal_year(fiscal_year)?;
        if fiscal_day > days_in_year {
            return Err(FiscalError::OutOfRange {
                fiscal_year,
                fiscal_day,
                days_in_year,
            });
        }

        Ok(())
    }

    /// Whether `date` is on or after the (clamped) start day of its month.
    fn reached_month_start(&self, date: NaiveDate) -> bool {
        date.day() >= self.start_day || is_last_day_of_month(date)
    }

    /// Fiscal-year start advanced by `months` calendar months.
    fn advance_months(&self, fiscal_year: i32, months: u32) -> FiscalResult<NaiveDate> {
        check_fiscal_year(fiscal_year)?;

        let year = self.start_year.calendar_year_of(fiscal_year);
        NaiveDate::from_ymd_opt(year, self.start_month, self.start_day)
            .and_then(|start| start.checked_add_months(Months::new(months)))
            .ok_or_else(|| outside_calendar(fiscal_year))
    }

    fn boundary_start(&self, fiscal_year: i32, months: u32) -> FiscalResult<NaiveDateTime> {
        self.advance_months(fiscal_year, months)?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| outside_calendar(fiscal_year))
    }

    /// Last second before the boundary `months` after the year start.
    fn boundary_end(&self, fiscal_year: i32, months: u32) -> FiscalResult<NaiveDateTime> {
        self.advance_months(fiscal_year, months)?
            .pred_opt()
            .and_then(|last_day| last_day.and_hms_opt(23, 59, 59))
            .ok_or_else(|| outside_calendar(fiscal_year))
    }
}

/// Quarter (1..=4) a fiscal month (1..=12) falls in.
pub(crate) const fn quarter_of_month(fiscal_month: u32) -> u32 {
    (fiscal_month - 1) / MONTHS_PER_QUARTER + 1
}

pub(crate) fn check_fiscal_year(fiscal_year: i32) -> FiscalResult<()> {
    if (MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&fiscal_year) {
        Ok(())
    } else {
        Err(outside_calendar(fiscal_year))
    }
}

pub(crate) fn check_quarter(quarter: u32) -> FiscalResult<()> {
    if (MIN_QUARTER..=MAX_QUARTER).contains(&quarter) {
        Ok(())
    } else {
        Err(FiscalError::invalid_period(
            "quarter",
            quarter,
            i64::from(MIN_QUARTER),
            i64::from(MAX_QUARTER),
        ))
    }
}

pub(crate) fn check_fiscal_month(fiscal_month: u32) -> FiscalResult<()> {
    if (1..=MONTHS_PER_YEAR).contains(&fiscal_month) {
        Ok(())
    } else {
        Err(FiscalError::invalid_period(
            "fiscal month",
            fiscal_month,
            1,
            i64::from(MONTHS_PER_YEAR),
        ))
    }
}

fn outside_calendar(fiscal_year: i32) -> FiscalError {
    FiscalError::invalid_period(
        "fiscal year",
        fiscal_year,
        i64::from(MIN_FISCAL_YEAR),
        i64::from(MAX_FISCAL_YEAR),
    )
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}
