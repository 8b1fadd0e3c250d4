//! Configuration for gear synthesis.
//!
//! Holds the sampling resolution, the machining defaults applied to new
//! designs and a table of named gear presets. Configuration is read from and
//! written to JSON or TOML files, chosen by extension.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use gearcut_core::units::{format_length, parse_length};
use gearcut_core::Resolution;
pub use gearcut_core::units::MeasurementSystem;
use gearcut_profiles::GearParameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Machining defaults applied to new designs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileDefaults {
    /// Largest deviation allowed when flattening curves, in millimetres
    pub max_error: f64,
    /// Diameter of the cutter, zero for none
    pub cutter_diameter: f64,
    /// Backlash for involute gears, in millimetres
    pub backlash: f64,
    /// Pressure angle for involute gears, in degrees
    pub pressure_angle: f64,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            max_error: 0.01,
            cutter_diameter: 0.0,
            backlash: 0.0,
            pressure_angle: 20.0,
        }
    }
}

impl ProfileDefaults {
    /// Applies these defaults to `parameters`. Backlash and pressure angle
    /// only concern involute gears.
    pub fn apply_to(&self, parameters: GearParameters) -> GearParameters {
        match parameters.with_machining(self.max_error, self.cutter_diameter) {
            GearParameters::Involute(mut involute) => {
                involute.backlash = self.backlash;
                involute.pressure_angle = self.pressure_angle;
                GearParameters::Involute(involute)
            }
            other => other,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Units assumed for lengths typed without a unit, and used when
    /// displaying lengths
    pub units: MeasurementSystem,
    /// Sampling resolution for curve generation
    pub resolution: Resolution,
    /// Machining defaults
    pub defaults: ProfileDefaults,
    /// Saved designs by name
    pub presets: BTreeMap<String, GearParameters>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the configuration file in the user's config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gearcut").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json_string(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config = match format {
            Format::Json => Self::from_json_str(&content)?,
            Format::Toml => Self::from_toml_str(&content)?,
        };
        info!(
            path = %path.display(),
            presets = config.presets.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => self.to_json_string()?,
            Format::Toml => self.to_toml_string()?,
        };
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.resolution
            .validate()
            .map_err(|e| SettingsError::InvalidSetting {
                key: "resolution.points_per_rotation".to_string(),
                reason: e.to_string(),
            })?;

        let d = &self.defaults;
        if !d.max_error.is_finite() || d.max_error <= 0.0 {
            return Err(out_of_range("defaults.max_error", d.max_error));
        }
        if !d.cutter_diameter.is_finite() || d.cutter_diameter < 0.0 {
            return Err(out_of_range("defaults.cutter_diameter", d.cutter_diameter));
        }
        if !d.backlash.is_finite() || d.backlash < 0.0 {
            return Err(out_of_range("defaults.backlash", d.backlash));
        }
        if !(1.0..=45.0).contains(&d.pressure_angle) {
            return Err(out_of_range("defaults.pressure_angle", d.pressure_angle));
        }

        for (name, parameters) in &self.presets {
            parameters
                .validate()
                .map_err(|e| SettingsError::InvalidSetting {
                    key: format!("presets.{}", name),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Merge another config into this one. Sections left at their defaults in
    /// `other` keep the values already here; presets of the same name are
    /// replaced.
    pub fn merge(&mut self, other: &Config) {
        if other.units != MeasurementSystem::default() {
            self.units = other.units;
        }
        if other.resolution != Resolution::default() {
            self.resolution = other.resolution;
        }
        if other.defaults != ProfileDefaults::default() {
            self.defaults = other.defaults.clone();
        }
        for (name, parameters) in &other.presets {
            self.presets.insert(name.clone(), parameters.clone());
        }
    }

    /// Parses a length typed by the user into millimetres. Bare numbers are
    /// read in `units`; a trailing "mm", "in" or `"` overrides it.
    pub fn parse_length(&self, input: &str) -> SettingsResult<f64> {
        let value = parse_length(input, self.units).map_err(|e| SettingsError::InvalidSetting {
            key: "length".to_string(),
            reason: e.to_string(),
        })?;
        if value < 0.0 {
            return Err(out_of_range("length", value));
        }
        Ok(value)
    }

    /// Formats a length in millimetres in `units`, with its unit.
    pub fn format_length(&self, value_mm: f64) -> String {
        format!("{} {}", format_length(value_mm, self.units), self.units.suffix())
    }

    /// The named preset.
    pub fn preset(&self, name: &str) -> SettingsResult<&GearParameters> {
        self.presets
            .get(name)
            .ok_or_else(|| ConfigError::MissingKey(format!("presets.{}", name)).into())
    }

    /// Stores `parameters` under `name` with the machining defaults applied.
    pub fn add_preset(&mut self, name: impl Into<String>, parameters: GearParameters) {
        self.presets
            .insert(name.into(), self.defaults.apply_to(parameters));
    }
}

fn out_of_range(key: &str, value: f64) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}
