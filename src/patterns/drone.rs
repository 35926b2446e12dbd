use super::burst_alpha;
use crate::color::Paint;
use crate::geometry::random_range;
use crate::particle::Particle;
use crate::shape::CustomShape;
use fastrand::Rng;
use glam::Vec2;

pub const DRONE_SCALE: f32 = 60.0; // Sim units per normalized unit
pub const DRONE_JITTER: f32 = 0.05; // Max per-axis birth velocity
const DRONE_DECAY: f32 = 0.004; // ~250 frames of hover

const DRONE_PALETTE: [Paint; 3] = [
    Paint::triplet(255, 255, 255),
    Paint::triplet(120, 200, 255),
    Paint::triplet(255, 120, 220),
];

// One light per point, colored by index. No trails.
pub fn drone_display(
    origin: Vec2,
    shape: &CustomShape,
    scale: f32,
    rng: &mut Rng,
) -> Vec<Particle> {
    shape
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let vel = Vec2::new(
                random_range(rng, -DRONE_JITTER, DRONE_JITTER),
                random_range(rng, -DRONE_JITTER, DRONE_JITTER),
            );
            Particle::new(
                origin + *p * scale,
                vel,
                DRONE_PALETTE[i % DRONE_PALETTE.len()],
                burst_alpha(rng),
                DRONE_DECAY,
                2.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_light_per_point_in_palette_order() {
        let mut rng = Rng::with_seed(1);
        let shape = CustomShape::from_normalized(vec![Vec2::ZERO; 7]);
        let lights = drone_display(Vec2::new(5.0, 5.0), &shape, DRONE_SCALE, &mut rng);
        assert_eq!(lights.len(), 7);
        for (i, light) in lights.iter().enumerate() {
            assert_eq!(light.color, DRONE_PALETTE[i % 3]);
            assert_eq!(light.pos, Vec2::new(5.0, 5.0));
        }
    }
}
