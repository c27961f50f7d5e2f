//! Shared types and configuration for the fiscal calendar engine.
//!
//! This crate provides common pieces used by the core crate:
//! - The `StartYear` convention type
//! - Configuration loading from files and the environment

pub mod config;
pub mod types;

pub use config::{AppConfig, CalendarSettings};
pub use types::StartYear;
