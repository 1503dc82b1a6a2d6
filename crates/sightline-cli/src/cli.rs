//! Command-line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sightline_core::Point3;

/// Device orientation and target aiming
#[derive(Debug, Parser)]
#[command(name = "sightline")]
#[command(version)]
#[command(about = "Report device attitude and a target's bearing relative to the device plane")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (takes precedence over SIGHTLINE_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Device location, overriding the configured one
    #[arg(
        long,
        global = true,
        value_name = "X,Y,Z",
        value_parser = parse_point,
        allow_hyphen_values = true
    )]
    pub device: Option<Point3>,

    /// Target location, overriding the configured one
    #[arg(
        long,
        global = true,
        value_name = "X,Y,Z",
        value_parser = parse_point,
        allow_hyphen_values = true
    )]
    pub target: Option<Point3>,

    /// Print one JSON object per result instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn a simulated device in place and report every result
    Simulate(SimulateArgs),
    /// Feed recorded samples and location updates from a JSON-lines file
    Replay {
        /// File with one record per line
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Number of attitudes to simulate
    #[arg(long, default_value_t = 72)]
    pub steps: u32,

    /// Yaw increment between attitudes, degrees
    #[arg(long = "yaw-step", value_name = "DEG", default_value_t = 5.0, allow_hyphen_values = true)]
    pub yaw_step: f64,

    /// Fixed pitch of the simulated device, degrees
    #[arg(long, value_name = "DEG", default_value_t = 0.0, allow_hyphen_values = true)]
    pub pitch: f64,

    /// Drive the accelerometer + magnetometer pathway instead of the rotation vector
    #[arg(long)]
    pub raw: bool,
}

/// Parse `X,Y,Z` into a point
pub fn parse_point(s: &str) -> Result<Point3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z but got '{}'", s));
    }

    let mut coords = [0.0f64; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        let value: f64 = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
        if !value.is_finite() {
            return Err(format!("'{}' is not a finite coordinate", part));
        }
        *slot = value;
    }

    Ok(Point3::from(coords))
}
