use crate::color::Paint;
use fastrand::Rng;
use glam::Vec2;
use std::collections::VecDeque;

/// Chance per frame that a shimmering particle re-brightens.
pub const SHIMMER_CHANCE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleShape {
    Dot,
    Heart,
}

/// Bounded history of recent positions, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    cap: usize,
}

impl Trail {
    /// Larger particles keep a longer tail.
    pub fn for_size(size: f32) -> Self {
        let cap = 4 + (size * 2.0).round().max(0.0) as usize;
        Self::with_capacity(cap)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.max(2);
        Self { points: VecDeque::with_capacity(cap + 1), cap }
    }

    pub fn push(&mut self, p: Vec2) {
        self.points.push_back(p);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
    pub decay: f32,
    pub color: Paint,
    pub size: f32,
    pub trail: Option<Trail>,
    pub shimmer: bool,
    pub shape: ParticleShape,
}

/// Physics knobs shared by every particle in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePhysics {
    pub friction: f32,
    pub gravity: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Paint, alpha: f32, decay: f32, size: f32) -> Self {
        Self {
            pos,
            vel,
            alpha,
            decay,
            color,
            size,
            trail: None,
            shimmer: false,
            shape: ParticleShape::Dot,
        }
    }

    pub fn with_trail(mut self) -> Self {
        let mut trail = Trail::for_size(self.size);
        trail.push(self.pos);
        self.trail = Some(trail);
        self
    }

    pub fn with_shimmer(mut self) -> Self {
        self.shimmer = true;
        self
    }

    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn has_trail(&self) -> bool {
        self.trail.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    /// Advances one frame. Returns whether the particle survives it.
    pub fn step(&mut self, physics: &ParticlePhysics, rng: &mut Rng) -> bool {
        self.vel *= physics.friction;
        self.vel.y += physics.gravity;
        self.pos += self.vel;
        self.alpha -= self.decay;

        if !self.is_alive() {
            return false;
        }

        // Post-decay override: a flicker upward, never a replacement of decay.
        if self.shimmer && rng.f32() < SHIMMER_CHANCE {
            let flash = 0.7 + rng.f32() * 0.3;
            self.alpha = self.alpha.max(flash);
        }

        if let Some(trail) = self.trail.as_mut() {
            trail.push(self.pos);
        }

        true
    }
}

/// Steps every particle and drops the ones that faded out this frame.
pub fn step_all(particles: &mut Vec<Particle>, physics: &ParticlePhysics, rng: &mut Rng) {
    particles.retain_mut(|p| p.step(physics, rng));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STILL: ParticlePhysics = ParticlePhysics { friction: 1.0, gravity: 0.0 };

    fn dot(alpha: f32, decay: f32) -> Particle {
        Particle::new(Vec2::ZERO, Vec2::ZERO, Paint::triplet(255, 255, 255), alpha, decay, 2.0)
    }

    #[test]
    fn alpha_decays_linearly() {
        let mut rng = Rng::with_seed(1);
        let mut p = dot(0.9, 0.05);
        for _ in 0..10 {
            assert!(p.step(&STILL, &mut rng));
        }
        assert_relative_eq!(p.alpha, 0.4, epsilon = 1e-5);
    }

    #[test]
    fn removed_on_the_frame_alpha_hits_zero() {
        let mut rng = Rng::with_seed(1);
        let mut particles = vec![dot(0.5, 0.25), dot(1.0, 0.25)];

        step_all(&mut particles, &STILL, &mut rng);
        assert_eq!(particles.len(), 2);

        step_all(&mut particles, &STILL, &mut rng);
        assert_eq!(particles.len(), 1);
        assert_relative_eq!(particles[0].alpha, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn friction_and_gravity_shape_velocity() {
        let mut rng = Rng::with_seed(1);
        let physics = ParticlePhysics { friction: 0.5, gravity: 1.0 };
        let mut p = dot(1.0, 0.01);
        p.vel = Vec2::new(4.0, 0.0);

        p.step(&physics, &mut rng);
        assert_relative_eq!(p.vel.x, 2.0);
        assert_relative_eq!(p.vel.y, 1.0);
        assert_relative_eq!(p.pos.x, 2.0);
        assert_relative_eq!(p.pos.y, 1.0);
    }

    #[test]
    fn shimmer_only_ever_raises_the_decayed_alpha() {
        let mut rng = Rng::with_seed(99);
        let mut p = dot(1.0, 0.005).with_shimmer();
        let mut flickered = false;
        for _ in 0..150 {
            let decayed = p.alpha - p.decay;
            p.step(&STILL, &mut rng);
            assert!(p.alpha >= decayed - 1e-5);
            // Anything above plain decay must be a flash.
            if p.alpha > decayed + 1e-5 {
                flickered = true;
                assert!(p.alpha >= 0.7);
            }
        }
        assert!(flickered);
    }

    #[test]
    fn flash_below_the_decayed_alpha_changes_nothing() {
        let mut rng = Rng::with_seed(5);
        for _ in 0..200 {
            // Flashes top out below 1.0.
            let mut p = dot(1.2, 0.1).with_shimmer();
            assert!(p.step(&STILL, &mut rng));
            assert_relative_eq!(p.alpha, 1.1, epsilon = 1e-6);
        }
    }

    #[test]
    fn shimmer_cannot_revive_a_dead_particle() {
        let mut rng = Rng::with_seed(3);
        for _ in 0..200 {
            let mut p = dot(0.05, 0.1).with_shimmer();
            assert!(!p.step(&STILL, &mut rng));
        }
    }

    #[test]
    fn trail_is_bounded() {
        let mut rng = Rng::with_seed(1);
        let mut p = dot(1.0, 0.001).with_trail();
        p.vel = Vec2::new(1.0, 0.0);
        let cap = p.trail.as_ref().unwrap().cap();
        for _ in 0..cap * 3 {
            p.step(&STILL, &mut rng);
        }
        let trail = p.trail.as_ref().unwrap();
        assert_eq!(trail.len(), cap);
        let newest = trail.points().last().unwrap();
        assert_eq!(newest, p.pos);
    }

    #[test]
    fn bigger_particles_keep_longer_trails() {
        assert!(Trail::for_size(4.0).cap() > Trail::for_size(1.0).cap());
    }
}
