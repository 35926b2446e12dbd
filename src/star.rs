use crate::geometry::random_range;
use fastrand::Rng;
use glam::Vec2;

/// Background twinkle. Never dies; rebuilt only when the viewport changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub blink: f32,
}

impl Star {
    pub fn step(&mut self) {
        self.opacity += self.blink;
        if !(0.0..=1.0).contains(&self.opacity) {
            self.blink = -self.blink;
        }
    }
}

/// `density` is stars per 10 000 square units.
pub fn star_field(size: Vec2, density: f32, rng: &mut Rng) -> Vec<Star> {
    let count = (size.x.max(0.0) * size.y.max(0.0) / 10_000.0 * density) as usize;
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(rng.f32() * size.x, rng.f32() * size.y),
            radius: random_range(rng, 0.5, 1.5),
            opacity: rng.f32(),
            blink: random_range(rng, 0.002, 0.012) * if rng.bool() { 1.0 } else { -1.0 },
        })
        .collect()
}
