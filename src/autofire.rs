use crate::geometry::random_range;
use crate::patterns::PatternType;
use fastrand::Rng;
use glam::Vec2;

/// Round-robin over every procedural pattern. The drone display is not in
/// the rotation.
#[derive(Debug, Default, Clone)]
pub struct PatternCycle {
    index: usize,
}

impl PatternCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> PatternType {
        let len = PatternType::fireworks().count();
        let pattern = PatternType::fireworks()
            .nth(self.index % len)
            .unwrap_or(PatternType::Standard);
        self.index = (self.index + 1) % len;
        pattern
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoLaunch {
    pub origin: Vec2,
    pub target: Vec2,
    pub pattern: PatternType,
}

/// Idle while `next_fire_ms` is `None`, armed otherwise.
#[derive(Debug, Clone)]
pub struct AutoFire {
    pub enabled: bool,
    next_fire_ms: Option<f64>,
    cycle: PatternCycle,
    min_interval_ms: f64,
    max_interval_ms: f64,
}

impl AutoFire {
    pub fn new(enabled: bool, min_interval_ms: f64, max_interval_ms: f64) -> Self {
        Self {
            enabled,
            next_fire_ms: None,
            cycle: PatternCycle::new(),
            min_interval_ms: min_interval_ms.min(max_interval_ms),
            max_interval_ms: max_interval_ms.max(min_interval_ms),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.next_fire_ms = None;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_fire_ms.is_some()
    }

    pub fn next_fire_ms(&self) -> Option<f64> {
        self.next_fire_ms
    }

    /// Called once per frame. An idle scheduler fires on the first eligible
    /// frame; an armed one waits for its timestamp.
    pub fn tick(
        &mut self,
        now_ms: f64,
        drawing: bool,
        viewport: Vec2,
        rng: &mut Rng,
    ) -> Option<AutoLaunch> {
        if !self.enabled || drawing {
            return None;
        }
        if self.next_fire_ms.is_some_and(|at| now_ms < at) {
            return None;
        }

        let spread = self.max_interval_ms - self.min_interval_ms;
        let interval = self.min_interval_ms + rng.f64() * spread;
        self.next_fire_ms = Some(now_ms + interval);

        let (w, h) = (viewport.x, viewport.y);
        let origin = Vec2::new(w / 2.0 + random_range(rng, -0.1, 0.1) * w, h);
        // Upper two thirds of the sky, away from the side edges
        let target = Vec2::new(
            random_range(rng, 0.1, 0.9) * w,
            random_range(rng, 0.1, 2.0 / 3.0) * h,
        );
        Some(AutoLaunch { origin, target, pattern: self.cycle.next() })
    }
}
