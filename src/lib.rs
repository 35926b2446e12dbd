//! Particle fireworks for the terminal: rockets, procedural bursts, a finale
//! fan, and a drone display that redraws freehand or typed shapes in light.

pub mod autofire;
pub mod color;
pub mod config;
pub mod effects;
pub mod error;
pub mod finale;
pub mod geometry;
pub mod particle;
pub mod patterns;
pub mod projectile;
pub mod render;
pub mod shape;
pub mod sim;
pub mod star;

pub use config::{Cli, SimConfig};
pub use error::{Error, Result};
pub use patterns::PatternType;
pub use sim::{Command, SimEvent, Simulation};
