//! Engine configuration parsed from command-line flags and environment variables.

use clap::Args;
use clap::builder::BoolishValueParser;
use road_canvas::catalog::{CurvePorts, Port};
use road_canvas::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, SNAP_THRESHOLD};
use road_canvas::engine::EngineConfig;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("surface {name} must be a positive number, got {value}")]
    InvalidSurface { name: &'static str, value: f64 },
    #[error("snap threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
    #[error("invalid curve base `{0}`; expected two adjacent ports such as `N,E`")]
    InvalidCurveBase(String),
}

/// Engine settings for a replay run.
///
/// Each flag falls back to a `ROADBOARD_*` environment variable:
/// - `ROADBOARD_SURFACE_WIDTH` / `ROADBOARD_SURFACE_HEIGHT`: default 1200 x 800
/// - `ROADBOARD_SNAP_THRESHOLD`: default 30
/// - `ROADBOARD_NO_SNAP`: start with snapping disabled (`1`/`0`, `yes`/`no`, `true`/`false`, `on`/`off`)
/// - `ROADBOARD_CURVE_BASE`: ports of a 0 degree curve, default `N,E`
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(long, env = "ROADBOARD_SURFACE_WIDTH", default_value_t = DEFAULT_SURFACE_WIDTH)]
    pub surface_width: f64,

    #[arg(long, env = "ROADBOARD_SURFACE_HEIGHT", default_value_t = DEFAULT_SURFACE_HEIGHT)]
    pub surface_height: f64,

    #[arg(long, env = "ROADBOARD_SNAP_THRESHOLD", default_value_t = SNAP_THRESHOLD)]
    pub snap_threshold: f64,

    #[arg(long, env = "ROADBOARD_NO_SNAP", value_parser = BoolishValueParser::new())]
    pub no_snap: bool,

    #[arg(long, env = "ROADBOARD_CURVE_BASE")]
    pub curve_base: Option<String>,
}

impl ConfigArgs {
    /// Validate the flags and build the engine configuration.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let surface_width = positive("width", self.surface_width)?;
        let surface_height = positive("height", self.surface_height)?;
        if !self.snap_threshold.is_finite() || self.snap_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.snap_threshold));
        }
        let curve_ports = match self.curve_base.as_deref() {
            Some(raw) => parse_curve_base(raw)?,
            None => CurvePorts::default(),
        };

        Ok(EngineConfig {
            surface_width,
            surface_height,
            snap_threshold: self.snap_threshold,
            snap_enabled: !self.no_snap,
            curve_ports,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 { Ok(value) } else { Err(ConfigError::InvalidSurface { name, value }) }
}

fn parse_port(raw: &str) -> Option<Port> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "N" => Some(Port::N),
        "E" => Some(Port::E),
        "S" => Some(Port::S),
        "W" => Some(Port::W),
        _ => None,
    }
}

/// Parse `"N,E"`-style input into a curve table rotated clockwise from that pair.
pub fn parse_curve_base(raw: &str) -> Result<CurvePorts, ConfigError> {
    let invalid = || ConfigError::InvalidCurveBase(raw.to_owned());
    let ports: Vec<Port> = raw.split(',').map(parse_port).collect::<Option<_>>().ok_or_else(invalid)?;
    let [a, b] = ports[..] else {
        return Err(invalid());
    };
    CurvePorts::rotated_from([a, b]).ok_or_else(invalid)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
