//! Fiscal calendar arithmetic for the fiscal calendar engine.
//!
//! This crate is pure computation with ZERO I/O: it maps calendar dates onto
//! fiscal years, quarters, months and days under a configurable start
//! convention, and provides value types for those periods.
//!
//! # Modules
//!
//! - `calendar` - The start convention, boundary arithmetic and the active calendar
//! - `period` - Fiscal year, quarter, month and day value types
//! - `date` - Dates and datetimes that answer fiscal questions on demand
//! - `clock` - Source of "today" for `current()` constructors
//! - `error` - Error type shared by every fallible operation
//!
//! ```
//! use fiscal_core::{FiscalDate, FiscalDatelike, FiscalYear, Period};
//!
//! let fy = FiscalYear::new(2017).unwrap();
//! assert_eq!(fy.start().to_string(), "2016-10-01 00:00:00");
//!
//! let date = FiscalDate::from_ymd_opt(2017, 1, 1).unwrap();
//! assert_eq!(date.fiscal_quarter(), 2);
//! assert!(fy.contains(&date));
//! ```

pub mod calendar;
pub mod clock;
pub mod date;
pub mod error;
pub mod period;

pub use calendar::{context, CalendarOverrides, FiscalCalendar};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{FiscalDate, FiscalDateTime, FiscalDatelike};
pub use error::{FiscalError, FiscalResult};
pub use fiscal_shared::StartYear;
pub use period::{FiscalDay, FiscalMonth, FiscalQuarter, FiscalYear, Period};
