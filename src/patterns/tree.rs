use super::{burst_alpha, by_distance, pick, polar};
use crate::color::Paint;
use crate::geometry::random_range;
use crate::particle::Particle;
use fastrand::Rng;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

const TRUNK_LENGTH: f32 = 120.0; // Trunk falls below the burst point
const CANOPY_RADIUS: f32 = 7.0; // Canopy spread

const BARK: [Paint; 3] = [
    Paint::triplet(255, 210, 120),
    Paint::triplet(220, 150, 70),
    Paint::triplet(170, 100, 40),
];

const ROOTS: [Paint; 2] = [Paint::triplet(200, 110, 40), Paint::triplet(150, 80, 30)];

// Canopy core to rim.
const LEAVES: [Paint; 4] = [
    Paint::triplet(230, 255, 180),
    Paint::triplet(140, 240, 110),
    Paint::triplet(60, 200, 90),
    Paint::triplet(30, 150, 80),
];

const BLOSSOM: Paint = Paint::triplet(255, 170, 210);

pub fn tree_burst(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    let mut out = trunk(origin, rng);
    out.extend(roots(origin + Vec2::new(0.0, TRUNK_LENGTH), rng));
    out.extend(canopy(origin, rng));
    out
}

fn trunk(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const COUNT: usize = 40;

    (0..COUNT)
        .map(|i| {
            let t = i as f32 / COUNT as f32;
            let spread = 6.0 * (1.0 - t) + 1.0;
            let sway = (t * PI * 3.0).sin() * spread;
            let pos = origin + Vec2::new(sway + random_range(rng, -1.0, 1.0), t * TRUNK_LENGTH);
            let drift = random_range(rng, -0.15, 0.15) * spread;
            let vel = Vec2::new(drift, random_range(rng, 0.0, 0.2));
            let decay = random_range(rng, 0.008, 0.012);
            Particle::new(pos, vel, pick(&BARK, rng), burst_alpha(rng), decay, 2.2)
        })
        .collect()
}

fn roots(base: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const COUNT: usize = 30;
    const TURNS: f32 = 2.0;

    (0..COUNT)
        .map(|i| {
            let t = i as f32 / COUNT as f32;
            let angle = t * TURNS * TAU;
            let radius = t * 20.0;
            let pos = base + Vec2::new(angle.cos() * radius, angle.sin() * radius * 0.35);
            let vel = polar(angle, 0.3 + t * 0.6);
            let decay = random_range(rng, 0.01, 0.015);
            Particle::new(pos, vel, pick(&ROOTS, rng), burst_alpha(rng), decay, 1.8)
        })
        .collect()
}

// Upper half-disc, biased toward the rim
fn canopy(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const COUNT: usize = 150;

    (0..COUNT)
        .map(|_| {
            // y grows downward, so (PI, TAU) is the upper half.
            let angle = PI + rng.f32() * PI;
            let t = rng.f32().powf(0.6);
            let dir = Vec2::new(angle.cos(), angle.sin());
            let pos = origin + dir * t * CANOPY_RADIUS * 3.0;
            let color = if rng.f32() < 0.12 { BLOSSOM } else { by_distance(&LEAVES, t) };
            Particle::new(
                pos,
                dir * (0.5 + t * CANOPY_RADIUS * 0.6),
                color,
                burst_alpha(rng),
                random_range(rng, 0.009, 0.015),
                random_range(rng, 1.5, 2.5),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_add_up() {
        let mut rng = Rng::with_seed(31);
        assert_eq!(tree_burst(Vec2::ZERO, &mut rng).len(), 40 + 30 + 150);
    }

    #[test]
    fn trunk_hangs_below_and_canopy_rises_above() {
        let mut rng = Rng::with_seed(31);
        let origin = Vec2::new(100.0, 100.0);
        assert!(trunk(origin, &mut rng).iter().all(|p| p.pos.y >= origin.y));
        assert!(canopy(origin, &mut rng).iter().all(|p| p.vel.y <= 0.0));
    }

    #[test]
    fn trunk_narrows_toward_the_base() {
        let mut rng = Rng::with_seed(31);
        let origin = Vec2::ZERO;
        let trunk = trunk(origin, &mut rng);
        let widest_top = trunk[..10].iter().map(|p| p.pos.x.abs()).fold(0.0, f32::max);
        let widest_base = trunk[30..].iter().map(|p| p.pos.x.abs()).fold(0.0, f32::max);
        assert!(widest_base < widest_top);
    }
}
