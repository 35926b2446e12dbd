use super::{burst_alpha, by_distance, pick, polar, random_angle};
use crate::color::Paint;
use crate::geometry::random_range;
use crate::particle::Particle;
use fastrand::Rng;
use glam::Vec2;
use std::f32::consts::TAU;

#[derive(Clone, Copy)]
enum Lobe {
    Cos,
    Sin,
}

struct Flower {
    lobes: f32,
    lobe: Lobe,
    sharpness: f32,
    petals: usize,
    max_speed: f32,
    palette: &'static [Paint],
    inner: usize,
    inner_color: Paint,
    highlights: usize,
}

const NEON_PALETTE: [Paint; 4] = [
    Paint::triplet(255, 255, 255),
    Paint::triplet(255, 120, 255),
    Paint::triplet(255, 40, 200),
    Paint::triplet(120, 255, 80),
];

const CYAN_PALETTE: [Paint; 4] = [
    Paint::triplet(230, 255, 255),
    Paint::triplet(120, 255, 255),
    Paint::triplet(0, 220, 255),
    Paint::triplet(0, 150, 220),
];

const FLORAL_PALETTE: [Paint; 5] = [
    Paint::triplet(255, 240, 120),
    Paint::triplet(255, 160, 60),
    Paint::triplet(255, 90, 130),
    Paint::triplet(200, 80, 255),
    Paint::triplet(90, 160, 255),
];

const VIOLET_PALETTE: [Paint; 4] = [
    Paint::triplet(240, 220, 255),
    Paint::triplet(200, 140, 255),
    Paint::triplet(150, 70, 255),
    Paint::triplet(100, 30, 200),
];

const HIGHLIGHT: Paint = Paint::triplet(255, 255, 255);

// |cos(k theta)|^p, p < 1 fattens the petals
fn petal_radius(lobe: Lobe, lobes: f32, sharpness: f32, theta: f32) -> f32 {
    let wave = match lobe {
        Lobe::Cos => (lobes * theta).cos(),
        Lobe::Sin => (lobes * theta).sin(),
    };
    wave.abs().powf(sharpness)
}

fn bloom(origin: Vec2, flower: &Flower, rng: &mut Rng) -> Vec<Particle> {
    let mut out = Vec::with_capacity(flower.petals + flower.inner + flower.highlights);
    let spin = random_angle(rng);

    for _ in 0..flower.petals {
        let theta = random_angle(rng);
        let r = petal_radius(flower.lobe, flower.lobes, flower.sharpness, theta);
        let reach = r * random_range(rng, 0.7, 1.0); // Fill the petal, not only its tip
        let vel = polar(theta + spin, 0.4 + reach * flower.max_speed);
        out.push(Particle::new(
            origin,
            vel,
            by_distance(flower.palette, reach),
            burst_alpha(rng),
            random_range(rng, 0.011, 0.018),
            1.5 + r,
        ));
    }

    for i in 0..flower.inner {
        let theta = i as f32 / flower.inner as f32 * TAU;
        let vel = polar(theta + spin, flower.max_speed * 0.3); // Tight inner ring
        out.push(Particle::new(
            origin,
            vel,
            flower.inner_color,
            burst_alpha(rng),
            0.02,
            1.8,
        ));
    }

    for _ in 0..flower.highlights {
        let vel = polar(random_angle(rng), random_range(rng, 0.5, flower.max_speed * 0.8));
        let decay = random_range(rng, 0.02, 0.03);
        let spark = Particle::new(origin, vel, HIGHLIGHT, burst_alpha(rng), decay, 1.2);
        out.push(spark.with_shimmer());
    }

    out
}

pub fn neon_flower(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    let inner_color = pick(&NEON_PALETTE[2..], rng);
    bloom(
        origin,
        &Flower {
            lobes: 4.0,
            lobe: Lobe::Cos,
            sharpness: 0.5,
            petals: 110,
            max_speed: 6.0,
            palette: &NEON_PALETTE,
            inner: 30,
            inner_color,
            highlights: 12,
        },
        rng,
    )
}

pub fn cyan_flower(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    bloom(
        origin,
        &Flower {
            lobes: 3.0,
            lobe: Lobe::Sin,
            sharpness: 0.6,
            petals: 100,
            max_speed: 5.5,
            palette: &CYAN_PALETTE,
            inner: 24,
            inner_color: Paint::triplet(255, 255, 255),
            highlights: 0,
        },
        rng,
    )
}

pub fn floral_burst(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    let inner_color = pick(&FLORAL_PALETTE, rng);
    bloom(
        origin,
        &Flower {
            lobes: 5.0,
            lobe: Lobe::Cos,
            sharpness: 0.4,
            petals: 130,
            max_speed: 6.5,
            palette: &FLORAL_PALETTE,
            inner: 36,
            inner_color,
            highlights: 16,
        },
        rng,
    )
}

pub fn violet_burst(origin: Vec2, rng: &mut Rng) -> Vec<Particle> {
    bloom(
        origin,
        &Flower {
            lobes: 6.0,
            lobe: Lobe::Sin,
            sharpness: 0.7,
            petals: 120,
            max_speed: 6.0,
            palette: &VIOLET_PALETTE,
            inner: 30,
            inner_color: Paint::triplet(255, 220, 255),
            highlights: 0,
        },
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn petal_radius_peaks_on_lobes_and_vanishes_between() {
        let k = 4.0;
        assert_relative_eq!(petal_radius(Lobe::Cos, k, 0.5, 0.0), 1.0);
        let gap = std::f32::consts::PI / (2.0 * k);
        assert!(petal_radius(Lobe::Cos, k, 0.5, gap) < 1e-3);
        assert_relative_eq!(petal_radius(Lobe::Sin, k, 0.5, gap), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn sub_unity_power_fattens_petals() {
        let theta = 0.3;
        let raw = petal_radius(Lobe::Cos, 3.0, 1.0, theta);
        let fat = petal_radius(Lobe::Cos, 3.0, 0.5, theta);
        assert!(fat > raw);
    }

    #[test]
    fn layers_are_all_present() {
        let mut rng = Rng::with_seed(13);
        let batch = floral_burst(Vec2::ZERO, &mut rng);
        assert_eq!(batch.len(), 130 + 36 + 16);
        assert_eq!(batch.iter().filter(|p| p.shimmer).count(), 16);
    }
}
