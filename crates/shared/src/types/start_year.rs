//! Relationship between a fiscal year and the calendar year it starts in.

use serde::{Deserialize, Serialize};

/// Which calendar year a fiscal year's first day falls in.
///
/// With `Previous`, FY2017 starts in calendar year 2016 (the U.S. federal
/// convention). With `Same`, FY2017 starts in calendar year 2017.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartYear {
    /// Fiscal year N starts in calendar year N - 1.
    #[default]
    Previous,
    /// Fiscal year N starts in calendar year N.
    Same,
}

impl StartYear {
    /// Returns the calendar year in which the given fiscal year starts.
    #[must_use]
    pub const fn calendar_year_of(self, fiscal_year: i32) -> i32 {
        match self {
            Self::Previous => fiscal_year - 1,
            Self::Same => fiscal_year,
        }
    }

    /// Returns the fiscal year that starts in the given calendar year.
    #[must_use]
    pub const fn fiscal_year_of(self, calendar_year: i32) -> i32 {
        match self {
            Self::Previous => calendar_year + 1,
            Self::Same => calendar_year,
        }
    }
}

impl std::fmt::Display for StartYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Previous => write!(f, "previous"),
            Self::Same => write!(f, "same"),
        }
    }
}

impl std::str::FromStr for StartYear {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "previous" => Ok(Self::Previous),
            "same" => Ok(Self::Same),
            _ => Err(format!(
                "start_year must be either 'previous' or 'same', not: '{s}'"
            )),
        }
    }
}
