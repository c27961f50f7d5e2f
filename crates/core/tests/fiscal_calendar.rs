//! End-to-end tests through the public API.

use chrono::NaiveDate;
use fiscal_core::{
    context, CalendarOverrides, FiscalCalendar, FiscalDate, FiscalDatelike, FiscalDay,
    FiscalError, FiscalMonth, FiscalQuarter, FiscalYear, FixedClock, Period, StartYear,
};
use fiscal_shared::CalendarSettings;
use rstest::rstest;

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test]
fn settings_drive_the_active_calendar() {
    let _reset = context::scoped(CalendarOverrides::new()).unwrap();
    let settings = CalendarSettings {
        start_year: StartYear::Same,
        start_month: 4,
        start_day: 6,
    };
    context::configure_from(&settings).unwrap();

    let fy = FiscalYear::new(2017).unwrap();
    assert_eq!(fy.start(), datetime(2017, 4, 6, 0, 0, 0));
    assert_eq!(fy.end(), datetime(2018, 4, 5, 23, 59, 59));
    assert_eq!(context::current(), FiscalCalendar::UK_PERSONAL);
}

#[test]
fn invalid_settings_are_rejected() {
    let settings = CalendarSettings {
        start_year: StartYear::Previous,
        start_month: 2,
        start_day: 30,
    };
    assert!(matches!(
        FiscalCalendar::try_from(settings),
        Err(FiscalError::InvalidConfig(_))
    ));
    assert!(context::configure_from(&settings).is_err());
    assert_eq!(context::current(), FiscalCalendar::US_FEDERAL);
}

#[rstest]
#[case(StartYear::Previous, 10, 1, 2017, datetime(2016, 10, 1, 0, 0, 0))]
#[case(StartYear::Previous, 4, 1, 2017, datetime(2016, 4, 1, 0, 0, 0))]
#[case(StartYear::Same, 4, 6, 2017, datetime(2017, 4, 6, 0, 0, 0))]
#[case(StartYear::Same, 1, 1, 2017, datetime(2017, 1, 1, 0, 0, 0))]
fn year_start_follows_convention(
    #[case] start_year: StartYear,
    #[case] start_month: u32,
    #[case] start_day: u32,
    #[case] fiscal_year: i32,
    #[case] expected: chrono::NaiveDateTime,
) {
    let calendar = FiscalCalendar::new(start_year, start_month, start_day).unwrap();
    let fy = FiscalYear::with_calendar(fiscal_year, &calendar).unwrap();
    assert_eq!(fy.start(), expected);
    assert_eq!(fy.q1().unwrap().start(), expected);
}

#[test]
fn walking_a_year_day_by_day() {
    let mut day = FiscalDay::new(2016, 1).unwrap();
    let mut count = 1;
    while day.fiscal_year() == 2016 {
        day = day.next_fiscal_day().unwrap();
        count += 1;
    }
    // FY2016 spans Feb 29 2016.
    assert_eq!(count - 1, 366);
    assert_eq!(day, FiscalDay::new(2017, 1).unwrap());
}

#[test]
fn current_periods_share_one_clock() {
    let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2017, 6, 7).unwrap());
    let day = FiscalDay::current(&clock).unwrap();
    let month = FiscalMonth::current(&clock).unwrap();
    let quarter = FiscalQuarter::current(&clock).unwrap();
    let year = FiscalYear::current(&clock).unwrap();

    assert_eq!(day, FiscalDay::new(2017, 250).unwrap());
    assert_eq!(month, FiscalMonth::new(2017, 9).unwrap());
    assert_eq!(quarter, FiscalQuarter::new(2017, 3).unwrap());
    assert_eq!(year, FiscalYear::new(2017).unwrap());
    assert!(year.contains(&quarter) && quarter.contains(&month) && month.contains(&day));
    assert_eq!(FiscalDate::today(&clock).fiscal_day().unwrap(), 250);
}

#[test]
fn scoped_calendar_does_not_leak_into_later_queries() {
    let date = FiscalDate::from_ymd_opt(2017, 1, 1).unwrap();
    let inside = {
        let _scope = context::scoped(
            CalendarOverrides::new()
                .start_year(StartYear::Same)
                .start_month(4)
                .start_day(6),
        )
        .unwrap();
        (date.fiscal_year(), date.fiscal_month(), date.fiscal_quarter())
    };
    assert_eq!(inside, (2016, 9, 3));
    assert_eq!(
        (date.fiscal_year(), date.fiscal_month(), date.fiscal_quarter()),
        (2017, 4, 2)
    );
}

#[test]
fn periods_serialize_with_their_bounds() {
    let quarter = FiscalQuarter::new(2017, 3).unwrap();
    let json = serde_json::to_value(quarter).unwrap();
    assert_eq!(json["fiscal_year"], 2017);
    assert_eq!(json["quarter"], 3);
    assert_eq!(json["start"], "2017-04-01T00:00:00");
    assert_eq!(json["end"], "2017-06-30T23:59:59");
}
