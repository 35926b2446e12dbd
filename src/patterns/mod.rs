//! Explosion generators. Every pattern is an independent function from an
//! origin and a random source to a batch of particles; physics lives
//! elsewhere and never needs to know which pattern produced a particle.

use crate::color::Paint;
use crate::particle::Particle;
use crate::shape::CustomShape;
use enum_iterator::{Sequence, all};
use fastrand::Rng;
use glam::Vec2;
use std::f32::consts::TAU;
use std::fmt;

mod curves;
pub mod drone;
mod petal;
mod radial;
mod tree;

pub use drone::DRONE_SCALE;
pub use radial::STANDARD_PALETTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum PatternType {
    Standard,
    Streamer,
    Glitter,
    Ring,
    Cosmic,
    Galaxy,
    GoldFlower,
    StrobeFlower,
    Palm,
    Heart,
    LoveBurst,
    NeonFlower,
    CyanFlower,
    FloralBurst,
    VioletBurst,
    TreeBurst,
    CustomShape,
}

impl PatternType {
    pub fn tag(self) -> &'static str {
        match self {
            PatternType::Standard => "standard",
            PatternType::Streamer => "streamer",
            PatternType::Glitter => "glitter",
            PatternType::Ring => "ring",
            PatternType::Cosmic => "cosmic",
            PatternType::Galaxy => "galaxy",
            PatternType::GoldFlower => "gold_flower",
            PatternType::StrobeFlower => "strobe_flower",
            PatternType::Palm => "palm",
            PatternType::Heart => "heart",
            PatternType::LoveBurst => "love_burst",
            PatternType::NeonFlower => "neon_flower",
            PatternType::CyanFlower => "cyan_flower",
            PatternType::FloralBurst => "floral_burst",
            PatternType::VioletBurst => "violet_burst",
            PatternType::TreeBurst => "tree_burst",
            PatternType::CustomShape => "custom_shape",
        }
    }

    /// Unknown tags fall back to `Standard` so a bad tag never stops the show.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        all::<PatternType>().find(|p| p.tag() == tag).unwrap_or_else(|| {
            tracing::warn!(tag, "unknown pattern type, using standard");
            PatternType::Standard
        })
    }

    pub fn is_drone(self) -> bool {
        self == PatternType::CustomShape
    }

    /// Every procedural pattern, in declaration order. Never contains the
    /// drone display.
    pub fn fireworks() -> impl Iterator<Item = PatternType> {
        all::<PatternType>().filter(|p| !p.is_drone())
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Produces the particles for one detonation.
///
/// An override color always wins and yields the small generic spray used by
/// finale shells. The drone display is only produced for an explicit
/// `CustomShape` tag and is empty while no shape is stored.
pub fn generate(
    origin: Vec2,
    pattern: PatternType,
    override_color: Option<Paint>,
    custom_shape: Option<&CustomShape>,
    rng: &mut Rng,
) -> Vec<Particle> {
    if let Some(color) = override_color {
        return radial::override_burst(origin, color, rng);
    }

    match pattern {
        PatternType::Standard => radial::standard(origin, rng),
        PatternType::Streamer => radial::streamer(origin, rng),
        PatternType::Glitter => radial::glitter(origin, rng),
        PatternType::Ring => radial::ring(origin, rng),
        PatternType::Cosmic => radial::cosmic(origin, rng),
        PatternType::Galaxy => radial::galaxy(origin, rng),
        PatternType::GoldFlower => radial::gold_flower(origin, rng),
        PatternType::StrobeFlower => radial::strobe_flower(origin, rng),
        PatternType::Palm => radial::palm(origin, rng),
        PatternType::Heart => curves::heart(origin, rng),
        PatternType::LoveBurst => curves::love_burst(origin, rng),
        PatternType::NeonFlower => petal::neon_flower(origin, rng),
        PatternType::CyanFlower => petal::cyan_flower(origin, rng),
        PatternType::FloralBurst => petal::floral_burst(origin, rng),
        PatternType::VioletBurst => petal::violet_burst(origin, rng),
        PatternType::TreeBurst => tree::tree_burst(origin, rng),
        PatternType::CustomShape => match custom_shape {
            Some(shape) => drone::drone_display(origin, shape, DRONE_SCALE, rng),
            None => {
                tracing::debug!("drone display requested without a custom shape");
                Vec::new()
            }
        },
    }
}

#[inline]
fn polar(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

#[inline]
fn random_angle(rng: &mut Rng) -> f32 {
    rng.f32() * TAU
}

#[inline]
fn pick(palette: &[Paint], rng: &mut Rng) -> Paint {
    palette[rng.usize(0..palette.len())]
}

/// Palette entry for a normalized distance from the burst center: index 0 is
/// the hot core, the last entry the outer edge.
#[inline]
fn by_distance(palette: &[Paint], t: f32) -> Paint {
    let idx = (t.clamp(0.0, 1.0) * (palette.len() - 1) as f32).round() as usize;
    palette[idx.min(palette.len() - 1)]
}

#[inline]
fn burst_alpha(rng: &mut Rng) -> f32 {
    0.6 + rng.f32() * 0.4
}
