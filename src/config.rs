//! Command-line configuration for the terminal host.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "pixel_shooter")]
#[command(about = "Retro 160x240 vertical shooter in the terminal")]
pub struct Config {
    /// Simulation steps (and redraws) per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Logical pixels per terminal column; picked from the terminal size when omitted
    #[arg(long)]
    pub scale: Option<u16>,

    /// Seed for the RNG; fresh entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal itself is busy drawing)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, same syntax as RUST_LOG (e.g. "debug" or "pixel_shooter=trace")
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            scale: None,
            seed: None,
            log_file: None,
            log_level: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(anyhow!("fps must be > 0"));
        }
        if self.scale == Some(0) {
            return Err(anyhow!("scale must be > 0"));
        }
        Ok(())
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
