//! Gearcut Settings Crate
//!
//! Loads and saves the configuration shared by every gear design: sampling
//! resolution, machining defaults and saved presets, as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, MeasurementSystem, ProfileDefaults};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
