//! Common types used across the workspace.

pub mod start_year;

pub use start_year::StartYear;
