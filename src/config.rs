use crate::color::{Rgb, parse_hex_color};
use crate::error::{Error, Result};
use crate::particle::ParticlePhysics;
use crate::projectile::RocketPhysics;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tunables for the simulation. Every field has a default, so a config file
/// only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub particle_friction: f32,
    /// Downward pull on exploded particles; zero leaves them suspended.
    pub particle_gravity: f32,
    pub rocket_acceleration: f32,
    pub rocket_start_speed: f32,
    pub finale_friction: f32,
    pub finale_gravity: f32,
    pub finale_speed_floor: f32,
    pub autofire_min_ms: f64,
    pub autofire_max_ms: f64,
    /// Stars per 10 000 square units.
    pub star_density: f32,
    pub auto_fire: bool,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let rocket = RocketPhysics::default();
        Self {
            particle_friction: 0.96,
            particle_gravity: 0.0,
            rocket_acceleration: rocket.acceleration,
            rocket_start_speed: rocket.start_speed,
            finale_friction: rocket.finale_friction,
            finale_gravity: rocket.finale_gravity,
            finale_speed_floor: rocket.speed_floor,
            autofire_min_ms: 800.0,
            autofire_max_ms: 2000.0,
            star_density: 1.2,
            auto_fire: false,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)?;
        Self::from_toml_str(&src)
    }

    pub fn particle_physics(&self) -> ParticlePhysics {
        ParticlePhysics { friction: self.particle_friction, gravity: self.particle_gravity }
    }

    pub fn rocket_physics(&self) -> RocketPhysics {
        RocketPhysics {
            acceleration: self.rocket_acceleration,
            start_speed: self.rocket_start_speed,
            finale_friction: self.finale_friction,
            finale_gravity: self.finale_gravity,
            speed_floor: self.finale_speed_floor,
        }
    }
}

fn parse_bg(s: &str) -> std::result::Result<Rgb, String> {
    parse_hex_color(s)
        .ok_or_else(|| format!("invalid hex color {s:?}, expected RRGGBB (e.g. 1a1b26)"))
}

/// Terminal fireworks with a drone-display mode.
///
/// Click to launch, right-click to fly the drone shape, `d` to draw a shape,
/// `t` to type one, `f` for the finale, `a` for auto-fire, `q` to quit.
#[derive(Debug, Parser)]
#[command(name = "skyburst", version)]
pub struct Cli {
    /// Background color as hex, e.g. 1a1b26
    #[arg(long, value_name = "RRGGBB", value_parser = parse_bg)]
    pub bg_color: Option<Rgb>,

    /// TOML file with simulation tunables
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Launch fireworks on a timer while idle
    #[arg(long)]
    pub auto_fire: bool,

    /// Pattern for click launches (unknown tags fall back to `standard`)
    #[arg(long, value_name = "TAG")]
    pub pattern: Option<String>,

    /// Preload the drone display with this text
    #[arg(long)]
    pub text: Option<String>,

    /// Simulation units per terminal pixel
    #[arg(long, default_value_t = 4.0)]
    pub scale: f32,

    /// Seed for reproducible shows
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here; nothing is logged without it
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

impl Cli {
    /// File values first, then flags on top.
    pub fn sim_config(&self) -> Result<SimConfig> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            let msg = format!("--scale must be positive, got {}", self.scale);
            return Err(Error::InvalidArgument(msg));
        }
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        if self.auto_fire {
            config.auto_fire = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}
