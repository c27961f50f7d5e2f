//! Fiscal calendar error types.

use thiserror::Error;

/// Result type alias using `FiscalError`.
pub type FiscalResult<T> = Result<T, FiscalError>;

/// Fiscal calendar errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// Start convention is invalid (bad month, or a day the month never has).
    #[error("Invalid fiscal calendar: {0}")]
    InvalidConfig(String),

    /// A period key is outside its nominal range.
    #[error("Invalid {unit}: {value} is not in {min}..={max}")]
    InvalidPeriod {
        /// Which key was rejected (e.g. "quarter").
        unit: &'static str,
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// Fiscal day exceeds the length of its fiscal year.
    #[error("Fiscal day {fiscal_day} is out of range: FY{fiscal_year} has {days_in_year} days")]
    OutOfRange {
        /// Fiscal year the day was requested in.
        fiscal_year: i32,
        /// The requested fiscal day.
        fiscal_day: u32,
        /// Actual number of days in the fiscal year.
        days_in_year: u32,
    },
}

impl FiscalError {
    pub(crate) fn invalid_period(unit: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        Self::InvalidPeriod {
            unit,
            value: value.into(),
            min,
            max,
        }
    }
}
