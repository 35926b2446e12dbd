use super::{burst_alpha, pick, polar, random_angle};
use crate::color::Paint;
use crate::geometry::random_range;
use crate::particle::{Particle, ParticleShape};
use fastrand::Rng;
use glam::Vec2;
use std::f32::consts::TAU;

const HEART_PALETTE: [Paint; 4] = [
    Paint::triplet(255, 60, 90),
    Paint::triplet(255, 110, 150),
    Paint::triplet(255, 170, 200),
    Paint::triplet(230, 30, 70),
];

// Spans roughly 32 x 29 units, nose pointing down
pub fn heart_curve(t: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    Vec2::new(x, y)
}

pub fn heart(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const COUNT: usize = 80;

    let scale = random_range(rng, 0.2, 0.25); // Curve units to speed
    (0..COUNT)
        .map(|i| {
            let t = i as f32 / COUNT as f32 * TAU;
            let jitter = random_range(rng, 0.95, 1.05);
            Particle::new(
                origin,
                heart_curve(t) * scale * jitter,
                pick(&HEART_PALETTE, rng),
                burst_alpha(rng),
                random_range(rng, 0.01, 0.016),
                2.0,
            )
        })
        .collect()
}

pub fn love_burst(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    const OUTLINE: usize = 40;
    const SPRAY: usize = 30;

    let scale = random_range(rng, 0.26, 0.3);
    let mut out = Vec::with_capacity(OUTLINE + SPRAY);

    for i in 0..OUTLINE {
        let t = i as f32 / OUTLINE as f32 * TAU;
        let jitter = random_range(rng, 0.9, 1.1);
        let p = Particle::new(
            origin,
            heart_curve(t) * scale * jitter,
            pick(&HEART_PALETTE, rng),
            burst_alpha(rng),
            random_range(rng, 0.009, 0.014),
            3.5,
        );
        out.push(p.with_shape(ParticleShape::Heart));
    }

    for _ in 0..SPRAY {
        let vel = polar(random_angle(rng), random_range(rng, 0.5, 2.5));
        out.push(
            Particle::new(
                origin,
                vel,
                Paint::triplet(255, 200, 220),
                burst_alpha(rng),
                random_range(rng, 0.02, 0.03),
                1.5,
            )
            .with_shimmer(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn heart_curve_landmarks() {
        // t = 0: the notch at the top center.
        let top = heart_curve(0.0);
        assert_relative_eq!(top.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(top.y, -5.0, epsilon = 1e-5);

        // t = pi: the point at the bottom.
        let tip = heart_curve(std::f32::consts::PI);
        assert_relative_eq!(tip.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(tip.y, 17.0, epsilon = 1e-4);
    }

    #[test]
    fn heart_velocities_are_mirror_symmetric() {
        let mut rng = Rng::with_seed(21);
        let batch = heart(Vec2::ZERO, &mut rng);
        let right = batch.iter().filter(|p| p.vel.x > 1e-4).count();
        let left = batch.iter().filter(|p| p.vel.x < -1e-4).count();
        assert_eq!(left, right);
    }

    #[test]
    fn love_burst_outline_uses_heart_sprites() {
        let mut rng = Rng::with_seed(21);
        let batch = love_burst(Vec2::ZERO, &mut rng);
        let hearts = batch.iter().filter(|p| p.shape == ParticleShape::Heart).count();
        assert_eq!(hearts, 40);
    }
}
