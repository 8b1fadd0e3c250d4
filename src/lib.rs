//! # Gearcut
//!
//! Outlines for gears and sprockets, ready to be cut on a CNC machine or
//! laser.
//!
//! ## Architecture
//!
//! Gearcut is organized as a workspace with multiple crates:
//!
//! 1. **gearcut-core** - Coordinates, curve generators, intersections, paths
//! 2. **gearcut-profiles** - Gear families, cutter compensation, cutouts
//! 3. **gearcut-settings** - Resolution, machining defaults and presets
//! 4. **gearcut** - This facade, plus logging setup
//!
//! ## Example
//!
//! ```no_run
//! use gearcut::{synthesize, Config, GearParameters, InvoluteParameters};
//!
//! let config = Config::default();
//! let params = GearParameters::Involute(InvoluteParameters::default());
//! let gear = synthesize(&params, &config)?;
//! for point in gear.generate_complete_gear_path() {
//!     println!("{:.4} {:.4}", point.x, point.y);
//! }
//! # Ok::<(), gearcut::ProfileError>(())
//! ```

pub use gearcut_core::{
    Angle, Bounds, CircularArc, Coordinate, CurveSegment, DrawablePath, GeometryError,
    GeometryResult, Line, MeasurementSystem, PolyLine, Resolution, ADJACENCY_TOLERANCE,
};
pub use gearcut_core::{curve, geometry, units};

pub use gearcut_profiles::{
    contact_ratio, contact_ratio_table, spokes_for, ChainSize, ChainSprocket,
    ChainSprocketParameters, CutoutParameters, Cutouts, CycloidalGear, CycloidalParameters,
    EscapementParameters, EscapementWheel, GearParameters, GearProfile, InvoluteGear,
    InvoluteParameters, ParameterError, ProfileError, ProfileResult, RatchetParameters,
    RatchetWheel, RollerSprocket, RollerSprocketParameters, SprocketLayer, ToothOutline,
};

pub use gearcut_settings::{Config, ConfigError, ProfileDefaults, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Synthesizes `parameters` at the resolution held in `config`.
pub fn synthesize(parameters: &GearParameters, config: &Config) -> ProfileResult<GearProfile> {
    let profile = GearProfile::synthesize(parameters, &config.resolution)?;
    tracing::info!(
        family = profile.family(),
        short_name = profile.short_name(),
        valid = profile.errors().is_empty(),
        "gear synthesized"
    );
    Ok(profile)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

/// Like [`init_logging`], but writes one JSON object per event for log
/// collectors.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}
