use crate::color::Paint;
use crate::geometry::distance;
use crate::patterns::PatternType;
use glam::Vec2;
use std::collections::VecDeque;

/// Positions kept for the rocket trail.
pub const HISTORY_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketPhysics {
    /// Per-frame speed multiplier for ordinary rockets (> 1).
    pub acceleration: f32,
    pub start_speed: f32,
    /// Per-frame speed multiplier for finale shells (< 1).
    pub finale_friction: f32,
    pub finale_gravity: f32,
    /// Finale shells burst once they slow below this.
    pub speed_floor: f32,
}

impl Default for RocketPhysics {
    fn default() -> Self {
        Self {
            acceleration: 1.05,
            start_speed: 2.0,
            finale_friction: 0.985,
            finale_gravity: 0.08,
            speed_floor: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub origin: Vec2,
    pub target: Vec2,
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    history: VecDeque<Vec2>,
    pub distance_to_target: f32,
    pub distance_traveled: f32,
    pub pattern: PatternType,
    /// Set only on finale shells; switches them to the decelerating regime.
    pub color: Option<Paint>,
    pub trail_width: Option<f32>,
}

/// What a projectile leaves behind on the frame it arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detonation {
    pub pos: Vec2,
    pub pattern: PatternType,
    pub color: Option<Paint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketStroke {
    pub color: Paint,
    pub alpha: f32,
    pub width: f32,
}

impl Projectile {
    pub fn launch(origin: Vec2, target: Vec2, pattern: PatternType, speed: f32) -> Self {
        let delta = target - origin;
        Self {
            origin,
            target,
            pos: origin,
            angle: delta.y.atan2(delta.x),
            speed,
            history: std::iter::repeat_n(origin, HISTORY_LEN).collect(),
            distance_to_target: distance(origin, target),
            distance_traveled: 0.0,
            pattern,
            color: None,
            trail_width: None,
        }
    }

    /// A decelerating shell aimed along `angle`; it bursts at `reach` or when
    /// it runs out of speed, whichever comes first.
    pub fn shell(
        origin: Vec2,
        angle: f32,
        speed: f32,
        reach: f32,
        color: Paint,
        trail_width: f32,
    ) -> Self {
        let target = origin + Vec2::new(angle.cos(), angle.sin()) * reach;
        let mut shell = Self::launch(origin, target, PatternType::Standard, speed);
        shell.angle = angle;
        shell.color = Some(color);
        shell.trail_width = Some(trail_width);
        shell
    }

    pub fn is_shell(&self) -> bool {
        self.color.is_some()
    }

    pub fn oldest(&self) -> Vec2 {
        self.history.front().copied().unwrap_or(self.pos)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed
    }

    /// Advances one frame; returns whether the projectile has arrived.
    pub fn step(&mut self, physics: &RocketPhysics) -> bool {
        self.history.pop_front();
        self.history.push_back(self.pos);

        if self.is_shell() {
            self.speed *= physics.finale_friction;
            let vel = self.velocity() + Vec2::new(0.0, physics.finale_gravity);
            self.angle = vel.y.atan2(vel.x);
            self.speed = vel.length();
        } else {
            self.speed *= physics.acceleration;
        }

        let vel = self.velocity();
        self.pos += vel;
        self.distance_traveled += vel.length();

        let reached = self.distance_traveled >= self.distance_to_target;
        let stalled = self.is_shell() && self.speed < physics.speed_floor;
        if reached && !self.is_shell() {
            self.pos = self.target;
        }
        reached || stalled
    }

    pub fn detonation(&self) -> Detonation {
        Detonation { pos: self.pos, pattern: self.pattern, color: self.color }
    }

    /// Stroke for the trail segment. Shells use their own color; rockets
    /// look up their pattern, falling back to a translucent drifting hue.
    pub fn stroke(&self, hue: f32) -> RocketStroke {
        if let Some(color) = self.color {
            return RocketStroke { color, alpha: 1.0, width: self.trail_width.unwrap_or(1.0) };
        }
        let fixed = |r, g, b| RocketStroke {
            color: Paint::triplet(r, g, b),
            alpha: 1.0,
            width: 1.0,
        };
        match self.pattern {
            PatternType::Heart | PatternType::LoveBurst => fixed(255, 120, 160),
            PatternType::GoldFlower | PatternType::Glitter | PatternType::Palm => {
                fixed(255, 210, 90)
            }
            PatternType::NeonFlower => fixed(255, 80, 230),
            PatternType::CyanFlower => fixed(80, 240, 255),
            PatternType::VioletBurst | PatternType::Galaxy | PatternType::Cosmic => {
                fixed(180, 120, 255)
            }
            PatternType::TreeBurst => fixed(140, 230, 120),
            PatternType::CustomShape => fixed(255, 255, 255),
            _ => RocketStroke { color: Paint::hsl(hue, 1.0, 0.6), alpha: 0.8, width: 1.0 },
        }
    }
}

/// Steps every projectile and removes the ones that arrived, returning their
/// detonations in the same pass.
pub fn step_all(projectiles: &mut Vec<Projectile>, physics: &RocketPhysics) -> Vec<Detonation> {
    let mut detonations = Vec::new();
    projectiles.retain_mut(|p| {
        if p.step(physics) {
            detonations.push(p.detonation());
            false
        } else {
            true
        }
    });
    detonations
}
