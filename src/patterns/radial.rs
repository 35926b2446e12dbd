use super::{burst_alpha, by_distance, pick, polar, random_angle};
use crate::color::Paint;
use crate::geometry::random_range;
use crate::particle::Particle;
use fastrand::Rng;
use glam::Vec2;
use std::f32::consts::TAU;

pub const STANDARD_PALETTE: [Paint; 6] = [
    Paint::triplet(255, 80, 80),   // red
    Paint::triplet(255, 200, 60),  // amber
    Paint::triplet(80, 200, 255),  // sky
    Paint::triplet(120, 255, 120), // lime
    Paint::triplet(255, 120, 255), // orchid
    Paint::triplet(255, 255, 255), // white
];

const STREAMER_PALETTE: [Paint; 4] = [
    Paint::triplet(255, 170, 60),
    Paint::triplet(255, 120, 40),
    Paint::triplet(255, 220, 120),
    Paint::triplet(255, 90, 90),
];

const GLITTER_PALETTE: [Paint; 3] = [
    Paint::triplet(255, 250, 220),
    Paint::triplet(255, 225, 130),
    Paint::triplet(230, 230, 255),
];

// Core to edge: hot white through lavender to deep blue.
const COSMIC_PALETTE: [Paint; 5] = [
    Paint::triplet(255, 255, 255),
    Paint::triplet(220, 200, 255),
    Paint::triplet(170, 120, 255),
    Paint::triplet(110, 80, 230),
    Paint::triplet(60, 60, 200),
];

const GALAXY_PALETTE: [Paint; 5] = [
    Paint::triplet(255, 250, 230),
    Paint::triplet(160, 240, 255),
    Paint::triplet(90, 170, 255),
    Paint::triplet(150, 90, 255),
    Paint::triplet(210, 80, 220),
];

const GOLD_PALETTE: [Paint; 4] = [
    Paint::triplet(255, 250, 210),
    Paint::triplet(255, 225, 120),
    Paint::triplet(255, 190, 50),
    Paint::triplet(220, 140, 20),
];

const STROBE_PALETTE: [Paint; 3] = [
    Paint::triplet(255, 255, 255),
    Paint::triplet(210, 225, 255),
    Paint::triplet(255, 240, 200),
];

const PALM_PALETTE: [Paint; 3] = [
    Paint::triplet(255, 200, 80),
    Paint::triplet(180, 255, 120),
    Paint::triplet(255, 160, 40),
];

pub const OVERRIDE_BURST_COUNT: usize = 30;

pub fn standard(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    (0..60)
        .map(|_| {
            let vel = polar(random_angle(rng), random_range(rng, 1.0, 6.0));
            Particle::new(
                origin,
                vel,
                pick(&STANDARD_PALETTE, rng),
                burst_alpha(rng),
                random_range(rng, 0.012, 0.025),
                random_range(rng, 1.5, 3.0),
            )
        })
        .collect()
}

pub fn streamer(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    (0..40)
        .map(|_| {
            let vel = polar(random_angle(rng), random_range(rng, 3.0, 8.0));
            Particle::new(
                origin,
                vel,
                pick(&STREAMER_PALETTE, rng),
                burst_alpha(rng),
                random_range(rng, 0.008, 0.015),
                random_range(rng, 2.0, 3.0),
            )
            .with_trail()
        })
        .collect()
}

pub fn glitter(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    (0..90)
        .map(|_| {
            // sqrt keeps the disc evenly filled instead of clumping in the middle
            let vel = polar(random_angle(rng), rng.f32().sqrt() * 5.5);
            Particle::new(
                origin,
                vel,
                pick(&GLITTER_PALETTE, rng),
                burst_alpha(rng),
                random_range(rng, 0.015, 0.03),
                random_range(rng, 1.0, 2.0),
            )
            .with_shimmer()
        })
        .collect()
}

pub fn ring(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const OUTER_RAYS: usize = 48;
    const INNER_RAYS: usize = 24;

    let outer = pick(&STANDARD_PALETTE, rng);
    let inner = pick(&STANDARD_PALETTE, rng);
    let spin = random_angle(rng);

    let mut out = Vec::with_capacity(OUTER_RAYS + INNER_RAYS);
    for i in 0..OUTER_RAYS {
        let angle = spin + i as f32 / OUTER_RAYS as f32 * TAU;
        let vel = polar(angle, random_range(rng, 4.8, 5.2));
        out.push(Particle::new(origin, vel, outer, burst_alpha(rng), 0.015, 2.5));
    }
    for i in 0..INNER_RAYS {
        let angle = spin + (i as f32 + 0.5) / INNER_RAYS as f32 * TAU; // Between outer rays
        let vel = polar(angle, random_range(rng, 2.4, 2.6));
        out.push(Particle::new(origin, vel, inner, burst_alpha(rng), 0.02, 2.0));
    }
    out
}

pub fn cosmic(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const MAX_SPEED: f32 = 6.5;

    (0..100)
        .map(|_| {
            // Squared sample biases toward the center for a denser core.
            let t = rng.f32().powi(2);
            let vel = polar(random_angle(rng), 0.3 + t * MAX_SPEED);
            Particle::new(
                origin,
                vel,
                by_distance(&COSMIC_PALETTE, t),
                burst_alpha(rng),
                random_range(rng, 0.01, 0.02),
                2.5 - t * 1.5, // Bigger in the core
            )
        })
        .collect()
}

pub fn galaxy(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const ARMS: usize = 4;
    const PER_ARM: usize = 30;
    const TWIST: f32 = 2.5 * std::f32::consts::PI; // 1.25 turns per arm

    let spin = random_angle(rng);
    let mut out = Vec::with_capacity(ARMS * PER_ARM);
    for arm in 0..ARMS {
        let base = spin + arm as f32 / ARMS as f32 * TAU;
        for _ in 0..PER_ARM {
            let t = rng.f32();
            let angle = base + t * TWIST + random_range(rng, -0.15, 0.15);
            let vel = polar(angle, 0.8 + t * 5.0);
            let mut p = Particle::new(
                origin,
                vel,
                by_distance(&GALAXY_PALETTE, t),
                burst_alpha(rng),
                random_range(rng, 0.01, 0.018),
                2.2 - t,
            );
            // Outer arm streaks
            if t > 0.6 {
                p = p.with_trail();
            }
            out.push(p);
        }
    }
    out
}

pub fn gold_flower(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const RAYS: usize = 36;
    const PER_RAY: usize = 3;

    let mut out = Vec::with_capacity(RAYS * PER_RAY);
    for ray in 0..RAYS {
        let angle = ray as f32 / RAYS as f32 * TAU;
        for step in 0..PER_RAY {
            let t = (step as f32 + rng.f32()) / PER_RAY as f32;
            let vel = polar(angle, 1.5 + t * 4.5);
            out.push(
                Particle::new(
                    origin,
                    vel,
                    by_distance(&GOLD_PALETTE, t),
                    burst_alpha(rng),
                    random_range(rng, 0.01, 0.016),
                    2.0,
                )
                .with_trail(),
            );
        }
    }
    out
}

pub fn strobe_flower(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const RAYS: usize = 14;

    (0..70)
        .map(|i| {
            let angle = (i % RAYS) as f32 / RAYS as f32 * TAU + random_range(rng, -0.08, 0.08);
            let vel = polar(angle, random_range(rng, 2.0, 5.5));
            Particle::new(
                origin,
                vel,
                pick(&STROBE_PALETTE, rng),
                burst_alpha(rng),
                random_range(rng, 0.02, 0.035),
                random_range(rng, 1.5, 2.5),
            )
            .with_shimmer()
        })
        .collect()
}

pub fn palm(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const FRONDS: usize = 8;
    const PER_FROND: usize = 10;

    let color = pick(&PALM_PALETTE, rng);
    let spin = random_angle(rng);
    let mut out = Vec::with_capacity(FRONDS * PER_FROND);
    for frond in 0..FRONDS {
        let angle = spin + frond as f32 / FRONDS as f32 * TAU;
        for i in 0..PER_FROND {
            let t = (i + 1) as f32 / PER_FROND as f32; // Never zero speed
            let vel = polar(angle + random_range(rng, -0.05, 0.05), t * 6.5); // Slight droop
            let decay = random_range(rng, 0.008, 0.012);
            out.push(Particle::new(origin, vel, color, burst_alpha(rng), decay, 3.0).with_trail());
        }
    }
    out
}

// Finale shells
pub fn override_burst(origin: Vec2, color: Paint, rng: &mut Rng) -> Vec<Particle> {
    (0..OVERRIDE_BURST_COUNT)
        .map(|_| {
            let vel = polar(random_angle(rng), random_range(rng, 1.0, 4.0));
            Particle::new(
                origin,
                vel,
                color,
                burst_alpha(rng),
                random_range(rng, 0.015, 0.03),
                random_range(rng, 1.5, 2.5),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_draws_from_its_palette() {
        let mut rng = Rng::with_seed(4);
        let batch = standard(Vec2::new(10.0, 10.0), &mut rng);
        assert_eq!(batch.len(), 60);
        for p in &batch {
            assert!(STANDARD_PALETTE.contains(&p.color));
            assert!((0.6..=1.0).contains(&p.alpha));
            assert!(!p.has_trail());
        }
    }

    #[test]
    fn ring_rays_are_evenly_spaced() {
        let mut rng = Rng::with_seed(4);
        let batch = ring(Vec2::ZERO, &mut rng);
        let outer: Vec<_> = batch.iter().take(48).collect();
        let step = TAU / 48.0;
        for pair in outer.windows(2) {
            let a = pair[0].vel.y.atan2(pair[0].vel.x);
            let b = pair[1].vel.y.atan2(pair[1].vel.x);
            let gap = (b - a).rem_euclid(TAU);
            assert!((gap - step).abs() < 1e-3, "gap {gap}");
        }
    }

    #[test]
    fn cosmic_core_is_hotter_than_edge() {
        let mut rng = Rng::with_seed(8);
        let batch = cosmic(Vec2::ZERO, &mut rng);
        let by_speed = |a: &&Particle, b: &&Particle| a.vel.length().total_cmp(&b.vel.length());
        let slowest = batch.iter().min_by(by_speed).unwrap();
        let fastest = batch.iter().max_by(by_speed).unwrap();
        let warmth = |p: &Particle| p.color.rgb.0 as u32 + p.color.rgb.1 as u32;
        assert!(warmth(slowest) > warmth(fastest));
    }

    #[test]
    fn glitter_and_strobe_shimmer() {
        let mut rng = Rng::with_seed(8);
        assert!(glitter(Vec2::ZERO, &mut rng).iter().all(|p| p.shimmer));
        assert!(strobe_flower(Vec2::ZERO, &mut rng).iter().all(|p| p.shimmer));
    }

    #[test]
    fn streamers_and_palms_trail() {
        let mut rng = Rng::with_seed(8);
        assert!(streamer(Vec2::ZERO, &mut rng).iter().all(Particle::has_trail));
        assert!(palm(Vec2::ZERO, &mut rng).iter().all(Particle::has_trail));
    }
}
