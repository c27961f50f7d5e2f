//! Property-based tests for fiscal period arithmetic.
//!
//! - Property 1: Year boundaries round-trip through date lookup
//! - Property 2: Adjacent periods tile with no gap or overlap
//! - Property 3: A date lies in the day, month, quarter and year it maps to
//! - Property 4: Leap fiscal years are exactly those spanning a February 29
//! - Property 5: Nested calendar scopes always restore

use chrono::{Datelike, NaiveDate, TimeDelta};
use fiscal_shared::StartYear;
use proptest::prelude::*;

use super::{FiscalDay, FiscalMonth, FiscalQuarter, FiscalYear, Period};
use crate::calendar::{context, days_in_month, CalendarOverrides, FiscalCalendar, REFERENCE_YEAR};

/// Strategy for any valid calendar, including clamped start days (29..=31).
fn any_calendar() -> impl Strategy<Value = FiscalCalendar> {
    (prop_oneof![Just(StartYear::Previous), Just(StartYear::Same)], 1u32..=12).prop_flat_map(
        |(start_year, start_month)| {
            let max_day = days_in_month(REFERENCE_YEAR, start_month).unwrap_or(28);
            (1u32..=max_day).prop_map(move |start_day| {
                FiscalCalendar::new(start_year, start_month, start_day).unwrap()
            })
        },
    )
}

/// Strategy for fiscal years well inside the supported range.
fn any_fiscal_year() -> impl Strategy<Value = i32> {
    1800i32..2400
}

/// Strategy for calendar dates between 1900 and 2300.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..146_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + TimeDelta::days(offset)
    })
}

/// Strategy for overrides that may or may not form a valid calendar.
fn any_overrides() -> impl Strategy<Value = CalendarOverrides> {
    (
        prop::option::of(prop_oneof![Just(StartYear::Previous), Just(StartYear::Same)]),
        prop::option::of(0u32..=13),
        prop::option::of(0u32..=32),
    )
        .prop_map(|(start_year, start_month, start_day)| CalendarOverrides {
            start_year,
            start_month,
            start_day,
        })
}

fn contains_feb_29(start: NaiveDate, end: NaiveDate) -> bool {
    (start.year()..=end.year())
        .filter_map(|y| NaiveDate::from_ymd_opt(y, 2, 29))
        .any(|leap_day| start <= leap_day && leap_day <= end)
}

/// Opens one scope per entry, recursing inside it, and checks the calendar
/// seen after each level unwinds.
fn nest_scopes(overrides: &[CalendarOverrides]) {
    let Some((first, rest)) = overrides.split_first() else {
        return;
    };
    let before = context::current();
    match context::scoped(*first) {
        Ok(scope) => {
            assert_eq!(context::current(), scope.calendar());
            nest_scopes(rest);
            assert_eq!(context::current(), scope.calendar());
            drop(scope);
        }
        Err(_) => {
            assert_eq!(context::current(), before);
            nest_scopes(rest);
        }
    }
    assert_eq!(context::current(), before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Property 1: Year boundaries round-trip through date lookup
    // =========================================================================

    /// The first and last days of a fiscal year both map back to that year.
    #[test]
    fn prop_year_boundaries_map_back(calendar in any_calendar(), fy in any_fiscal_year()) {
        let year = FiscalYear::with_calendar(fy, &calendar).unwrap();
        prop_assert_eq!(calendar.date_to_fiscal_year(year.start().date()), fy);
        prop_assert_eq!(calendar.date_to_fiscal_year(year.end().date()), fy);
        prop_assert_eq!(calendar.date_to_fiscal_day(year.end().date()).unwrap(), (fy, year.days_in_year()));
    }

    // =========================================================================
    // Property 2: Adjacent periods tile with no gap or overlap
    // =========================================================================

    /// One second after a year ends, the next year starts.
    #[test]
    fn prop_years_are_contiguous(calendar in any_calendar(), fy in any_fiscal_year()) {
        let year = FiscalYear::with_calendar(fy, &calendar).unwrap();
        let next = year.next_fiscal_year().unwrap();
        prop_assert_eq!(year.end() + TimeDelta::seconds(1), next.start());
    }

    /// Quarters and months partition the year.
    #[test]
    fn prop_sub_periods_partition_year(calendar in any_calendar(), fy in any_fiscal_year()) {
        let year = FiscalYear::with_calendar(fy, &calendar).unwrap();

        let quarters: Vec<FiscalQuarter> = year.quarters().collect();
        prop_assert_eq!(quarters.len(), 4);
        prop_assert_eq!(quarters[0].start(), year.start());
        prop_assert_eq!(quarters[3].end(), year.end());
        for pair in quarters.windows(2) {
            prop_assert_eq!(pair[0].end() + TimeDelta::seconds(1), pair[1].start());
        }

        let months: Vec<FiscalMonth> = year.months().collect();
        prop_assert_eq!(months.len(), 12);
        prop_assert_eq!(months[0].start(), year.start());
        prop_assert_eq!(months[11].end(), year.end());
        for pair in months.windows(2) {
            prop_assert_eq!(pair[0].end() + TimeDelta::seconds(1), pair[1].start());
            prop_assert!(pair[0].start() < pair[0].end());
        }
        for quarter in &quarters {
            prop_assert!(year.contains(quarter));
            prop_assert!(quarter.months().all(|m| quarter.contains(&m)));
        }
    }

    // =========================================================================
    // Property 3: A date lies in the periods it maps to
    // =========================================================================

    /// Lookup and construction agree, and containment is transitive.
    #[test]
    fn prop_date_lies_in_mapped_periods(calendar in any_calendar(), date in any_date()) {
        let (fy, fiscal_day) = calendar.date_to_fiscal_day(date).unwrap();
        let (month_fy, fiscal_month) = calendar.date_to_fiscal_month(date);
        let (quarter_fy, quarter) = calendar.date_to_fiscal_quarter(date);
        prop_assert_eq!(month_fy, fy);
        prop_assert_eq!(quarter_fy, fy);

        let day = FiscalDay::with_calendar(fy, fiscal_day, &calendar).unwrap();
        let month = FiscalMonth::with_calendar(fy, fiscal_month, &calendar).unwrap();
        let quarter = FiscalQuarter::with_calendar(fy, quarter, &calendar).unwrap();
        let year = FiscalYear::with_calendar(fy, &calendar).unwrap();

        prop_assert_eq!(day.date(), date);
        prop_assert!(month.contains(&date));
        prop_assert!(month.contains(&day));
        prop_assert!(quarter.contains(&month));
        prop_assert!(year.contains(&quarter));
        prop_assert!(year.contains(&day));
        prop_assert_eq!(month.fiscal_quarter(), quarter.quarter());
    }

    /// Stepping a day forward then back returns to the same day.
    #[test]
    fn prop_day_navigation_is_inverse(calendar in any_calendar(), date in any_date()) {
        let (fy, fiscal_day) = calendar.date_to_fiscal_day(date).unwrap();
        let day = FiscalDay::with_calendar(fy, fiscal_day, &calendar).unwrap();
        let next = day.next_fiscal_day().unwrap();
        prop_assert_eq!(next.date(), date.succ_opt().unwrap());
        prop_assert_eq!(next.prev_fiscal_day().unwrap(), day);
    }

    // =========================================================================
    // Property 4: Leap fiscal years span a February 29
    // =========================================================================

    #[test]
    fn prop_leap_iff_span_has_feb_29(calendar in any_calendar(), fy in any_fiscal_year()) {
        let year = FiscalYear::with_calendar(fy, &calendar).unwrap();
        let spans_leap_day = contains_feb_29(year.start().date(), year.end().date());
        prop_assert_eq!(calendar.is_leap(fy).unwrap(), spans_leap_day);
        prop_assert_eq!(year.days().count(), if spans_leap_day { 366 } else { 365 });
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 5: Nested calendar scopes always restore
    // =========================================================================

    #[test]
    fn prop_nested_scopes_restore(overrides in prop::collection::vec(any_overrides(), 3..8)) {
        let before = context::current();
        nest_scopes(&overrides);
        prop_assert_eq!(context::current(), before);
    }
}
