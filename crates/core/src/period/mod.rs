//! Fiscal period value types.
//!
//! Each period caches its start and end when constructed, using the calendar
//! active at that moment (or the one passed to `with_calendar`). Changing the
//! active calendar later does not move an existing period; navigation
//! (`next_*`, `prev_*`) and sub-period accessors keep using the calendar the
//! period was built with.

pub mod day;
pub mod month;
pub mod quarter;
pub mod year;

#[cfg(test)]
mod props;

use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::calendar::FiscalCalendar;

pub use day::FiscalDay;
pub use month::FiscalMonth;
pub use quarter::FiscalQuarter;
pub use year::FiscalYear;

/// A closed interval of time `[start, end]`.
pub trait Period {
    /// First instant of the period.
    fn start(&self) -> NaiveDateTime;

    /// Last instant of the period (23:59:59 of its last day for day-aligned periods).
    fn end(&self) -> NaiveDateTime;

    /// Returns true if `other` lies entirely within this period.
    fn contains<P: Period + ?Sized>(&self, other: &P) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }
}

impl Period for NaiveDateTime {
    fn start(&self) -> NaiveDateTime {
        *self
    }

    fn end(&self) -> NaiveDateTime {
        *self
    }
}

impl Period for NaiveDate {
    fn start(&self) -> NaiveDateTime {
        self.and_time(NaiveTime::MIN)
    }

    fn end(&self) -> NaiveDateTime {
        last_second(*self)
    }
}

/// Fiscal day numbers covered by `[start, end]`, both in the same fiscal year.
pub(crate) fn fiscal_day_span(
    calendar: &FiscalCalendar,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> RangeInclusive<u32> {
    match (
        calendar.date_to_fiscal_day(start.date()),
        calendar.date_to_fiscal_day(end.date()),
    ) {
        (Ok((_, first)), Ok((_, last))) => first..=last,
        _ => RangeInclusive::new(1, 0),
    }
}

/// 23:59:59 on `date`.
pub(crate) fn last_second(date: NaiveDate) -> NaiveDateTime {
    // NaiveTime arithmetic wraps: 00:00:00 - 1s = 23:59:59.
    date.and_time(NaiveTime::MIN - TimeDelta::seconds(1))
}
