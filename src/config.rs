use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::error::{Error, Result};
use crate::simulation::{LAUNCH_INTERVAL, SimulationConfig};

/// Terminal fireworks. Hold a mouse button to launch at the pointer.
///
/// Press 'q', ESC, or Ctrl+C to exit.
#[derive(Debug, Clone, Parser)]
#[command(name = "skyburst", version, about)]
pub struct Cli {
    /// Ticks between automatic launches
    #[arg(long, default_value_t = LAUNCH_INTERVAL)]
    pub interval: u32,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Surface units per canvas cell; larger values slow the show down
    #[arg(long, default_value_t = 4.0)]
    pub scale: f32,

    /// Seed for a reproducible show
    #[arg(long)]
    pub seed: Option<u64>,

    /// Background color as hex (e.g. --bg-color 1a1b26)
    #[arg(long, value_name = "RRGGBB")]
    pub bg_color: Option<String>,

    /// Write logs to this file (the display owns the terminal)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub fps: u32,
    pub scale: f32,
    pub background: (u8, u8, u8),
    pub log_file: Option<PathBuf>,
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            fps: 60,
            scale: 4.0,
            background: (0, 0, 0),
            log_file: None,
            verbose: 0,
        }
    }
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.fps == 0 {
            return Err(Error::InvalidConfig("--fps must be at least 1".into()));
        }
        if !(cli.scale.is_finite() && cli.scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "--scale must be a positive number, got {}",
                cli.scale
            )));
        }
        let background = match cli.bg_color {
            Some(hex) => parse_hex_color(&hex).ok_or(Error::InvalidColor(hex))?,
            None => (0, 0, 0),
        };

        Ok(Self {
            simulation: SimulationConfig {
                launch_interval: cli.interval,
                seed: cli.seed,
            },
            fps: cli.fps,
            scale: cli.scale,
            background,
            log_file: cli.log_file,
            verbose: cli.verbose,
        })
    }

    /// Duration of one simulation tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
