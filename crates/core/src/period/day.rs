//! A single fiscal day.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{FiscalMonth, FiscalQuarter, FiscalYear, Period};
use crate::calendar::{context, FiscalCalendar};
use crate::clock::Clock;
use crate::error::FiscalResult;

/// A day of a fiscal year, numbered from 1 at the fiscal year start.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FiscalDay {
    fiscal_year: i32,
    fiscal_day: u32,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip)]
    calendar: FiscalCalendar,
}

impl FiscalDay {
    /// Creates a fiscal day under the active calendar.
    ///
    /// Day 366 exists only in years that span a February 29.
    pub fn new(fiscal_year: i32, fiscal_day: u32) -> FiscalResult<Self> {
        Self::with_calendar(fiscal_year, fiscal_day, &context::current())
    }

    /// Creates a fiscal day under an explicit calendar.
    pub fn with_calendar(
        fiscal_year: i32,
        fiscal_day: u32,
        calendar: &FiscalCalendar,
    ) -> FiscalResult<Self> {
        Ok(Self {
            fiscal_year,
            fiscal_day,
            start: calendar.day_start(fiscal_year, fiscal_day)?,
            end: calendar.day_end(fiscal_year, fiscal_day)?,
            calendar: *calendar,
        })
    }

    /// Fiscal day for today.
    pub fn current(clock: &impl Clock) -> FiscalResult<Self> {
        let calendar = context::current();
        let (fiscal_year, fiscal_day) = calendar.date_to_fiscal_day(clock.today())?;
        Self::with_calendar(fiscal_year, fiscal_day, &calendar)
    }

    /// Returns the fiscal year number.
    #[must_use]
    pub const fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    /// Returns the 1-based day number within the fiscal year.
    #[must_use]
    pub const fn fiscal_day(&self) -> u32 {
        self.fiscal_day
    }

    /// Calendar date of this day.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar this day was built with.
    #[must_use]
    pub const fn calendar(&self) -> FiscalCalendar {
        self.calendar
    }

    /// Fiscal month containing this day.
    #[must_use]
    pub fn fiscal_month(&self) -> u32 {
        self.calendar.date_to_fiscal_month(self.date()).1
    }

    /// Quarter containing this day.
    #[must_use]
    pub fn fiscal_quarter(&self) -> u32 {
        self.calendar.date_to_fiscal_quarter(self.date()).1
    }

    /// The fiscal year this day belongs to.
    pub fn year(&self) -> FiscalResult<FiscalYear> {
        FiscalYear::with_calendar(self.fiscal_year, &self.calendar)
    }

    /// The quarter this day belongs to.
    pub fn quarter(&self) -> FiscalResult<FiscalQuarter> {
        FiscalQuarter::with_calendar(self.fiscal_year, self.fiscal_quarter(), &self.calendar)
    }

    /// The fiscal month this day belongs to.
    pub fn month(&self) -> FiscalResult<FiscalMonth> {
        FiscalMonth::with_calendar(self.fiscal_year, self.fiscal_month(), &self.calendar)
    }

    /// The previous day; day 1 rolls back to the last day of the previous year.
    pub fn prev_fiscal_day(&self) -> FiscalResult<Self> {
        if self.fiscal_day > 1 {
            return Self::with_calendar(self.fiscal_year, self.fiscal_day - 1, &self.calendar);
        }

        let fiscal_year = self.fiscal_year - 1;
        let last_day = self.calendar.days_in_fiscal_year(fiscal_year)?;
        Self::with_calendar(fiscal_year, last_day, &self.calendar)
    }

    /// The next day; the last day of a year rolls over to day 1 of the next.
    pub fn next_fiscal_day(&self) -> FiscalResult<Self> {
        let days_in_year = self.calendar.days_in_fiscal_year(self.fiscal_year)?;
        if self.fiscal_day < days_in_year {
            Self::with_calendar(self.fiscal_year, self.fiscal_day + 1, &self.calendar)
        } else {
            Self::with_calendar(self.fiscal_year + 1, 1, &self.calendar)
        }
    }
}

impl Period for FiscalDay {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl PartialEq for FiscalDay {
    fn eq(&self, other: &Self) -> bool {
        (self.fiscal_year, self.fiscal_day) == (other.fiscal_year, other.fiscal_day)
    }
}

impl Eq for FiscalDay {}

impl Hash for FiscalDay {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.fiscal_year, self.fiscal_day).hash(state);
    }
}

impl PartialOrd for FiscalDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by (fiscal year, fiscal day), consistent with `Eq`.
///
/// Under a single calendar this is the same as ordering by start instant.
/// Values built under different calendars still compare by key, not by
/// where their boundaries fall.
impl Ord for FiscalDay {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fiscal_year, self.fiscal_day).cmp(&(other.fiscal_year, other.fiscal_day))
    }
}

impl std::fmt::Display for FiscalDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{} FD{}", self.fiscal_year, self.fiscal_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::FiscalError;
    use rstest::rstest;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_basic() {
        let d = FiscalDay::new(2016, 1).unwrap();
        assert_eq!(d.fiscal_year(), 2016);
        assert_eq!(d.fiscal_day(), 1);
        assert_eq!(d.fiscal_month(), 1);
        assert_eq!(d.fiscal_quarter(), 1);
        assert_eq!(d.date(), date(2015, 10, 1));
        assert_eq!(d.to_string(), "FY2016 FD1");
    }

    #[test]
    fn test_day_250() {
        let d = FiscalDay::new(2017, 250).unwrap();
        assert_eq!(d.date(), date(2017, 6, 7));
        assert_eq!(d.start(), date(2017, 6, 7).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(d.end(), date(2017, 6, 7).and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(d.fiscal_month(), 9);
        assert_eq!(d.fiscal_quarter(), 3);
        assert_eq!(d.next_fiscal_day().unwrap(), FiscalDay::new(2017, 251).unwrap());
    }

    #[rstest]
    #[case(2017, 0)]
    #[case(2017, 367)]
    fn test_invalid_day_number(#[case] fiscal_year: i32, #[case] fiscal_day: u32) {
        assert!(matches!(
            FiscalDay::new(fiscal_year, fiscal_day),
            Err(FiscalError::InvalidPeriod { unit: "fiscal day", .. })
        ));
    }

    #[test]
    fn test_day_366_needs_leap_year() {
        assert!(FiscalDay::new(2016, 366).is_ok());
        assert_eq!(
            FiscalDay::new(2017, 366).unwrap_err(),
            FiscalError::OutOfRange {
                fiscal_year: 2017,
                fiscal_day: 366,
                days_in_year: 365,
            }
        );
    }

    #[test]
    fn test_navigation_across_years() {
        let first = FiscalDay::new(2017, 1).unwrap();
        assert_eq!(first.prev_fiscal_day().unwrap(), FiscalDay::new(2016, 366).unwrap());
        assert_eq!(
            FiscalDay::new(2015, 1).unwrap().prev_fiscal_day().unwrap(),
            FiscalDay::new(2014, 365).unwrap()
        );
        assert_eq!(
            FiscalDay::new(2016, 366).unwrap().next_fiscal_day().unwrap(),
            first
        );
        assert_eq!(
            FiscalDay::new(2017, 365).unwrap().next_fiscal_day().unwrap(),
            FiscalDay::new(2018, 1).unwrap()
        );
    }

    #[test]
    fn test_current() {
        let clock = FixedClock::at_date(date(2016, 10, 2));
        assert_eq!(FiscalDay::current(&clock).unwrap(), FiscalDay::new(2017, 2).unwrap());
    }

    #[test]
    fn test_parents_contain_day() {
        let d = FiscalDay::new(2017, 250).unwrap();
        let month = d.month().unwrap();
        let quarter = d.quarter().unwrap();
        let year = d.year().unwrap();
        assert_eq!(month, FiscalMonth::new(2017, 9).unwrap());
        assert!(month.contains(&d));
        assert!(quarter.contains(&month));
        assert!(year.contains(&quarter));
        assert!(year.contains(&d));
        assert!(!d.contains(&month));
    }

    #[test]
    fn test_hash_by_key() {
        let mut days = HashSet::new();
        days.insert(FiscalDay::new(2017, 1).unwrap());
        days.insert(FiscalDay::new(2017, 1).unwrap());
        days.insert(FiscalDay::new(2017, 2).unwrap());
        assert_eq!(days.len(), 2);
    }
}
