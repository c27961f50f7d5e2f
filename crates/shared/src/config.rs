//! Application configuration management.

use serde::{Deserialize, Serialize};

use crate::types::StartYear;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Fiscal calendar convention.
    #[serde(default)]
    pub calendar: CalendarSettings,
}

/// Fiscal calendar settings as read from files and the environment.
///
/// These are raw values; they are validated when converted into a
/// calendar by the core crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Calendar year the fiscal year starts in.
    #[serde(default)]
    pub start_year: StartYear,
    /// First month of the fiscal year.
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// First day of the first month of the fiscal year.
    #[serde(default = "default_start_day")]
    pub start_day: u32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            start_year: StartYear::default(),
            start_month: default_start_month(),
            start_day: default_start_day(),
        }
    }
}

fn default_start_month() -> u32 {
    10 // October, U.S. federal
}

fn default_start_day() -> u32 {
    1
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `FISCAL__*` variables
    /// (e.g. `FISCAL__CALENDAR__START_MONTH=4`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("FISCAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
