//! The simulation context: every live collection plus the command/query
//! surface the host drives it through. Commands run between frames;
//! [`Simulation::step`] runs exactly one update pass.

use crate::autofire::AutoFire;
use crate::config::SimConfig;
use crate::finale::finale_shells;
use crate::particle::{self, Particle, ParticlePhysics};
use crate::patterns::{self, PatternType};
use crate::projectile::{self, Projectile, RocketPhysics};
use crate::shape::{CustomShape, ShapeCapture};
use crate::star::{Star, star_field};
use fastrand::Rng;
use glam::Vec2;

/// One frame at 60 Hz.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Degrees the default rocket hue drifts per frame.
const HUE_DRIFT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    Launch { target: Vec2, pattern: PatternType },
    TriggerFinale,
    ClearDrawing,
    ConfirmDrawing,
    CommitText(String),
    SetCustomShape(Option<CustomShape>),
    SetDrawing(bool),
    SetAutoFire(bool),
    Resize(Vec2),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    ShapeCompleted { points: usize },
    Exploded { pattern: PatternType, particles: usize },
    /// A finale shell burst in its band color.
    ShellBurst { particles: usize },
    FinaleLaunched { count: usize },
}

pub struct Simulation {
    viewport: Vec2,
    clock_ms: f64,
    hue: f32,
    projectiles: Vec<Projectile>,
    particles: Vec<Particle>,
    stars: Vec<Star>,
    capture: ShapeCapture,
    custom_shape: Option<CustomShape>,
    drawing: bool,
    autofire: AutoFire,
    particle_physics: ParticlePhysics,
    rocket_physics: RocketPhysics,
    star_density: f32,
    events: Vec<SimEvent>,
    rng: Rng,
}

impl Simulation {
    pub fn new(viewport: Vec2, config: &SimConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let stars = star_field(viewport, config.star_density, &mut rng);
        Self {
            viewport,
            clock_ms: 0.0,
            hue: 120.0,
            projectiles: Vec::new(),
            particles: Vec::new(),
            stars,
            capture: ShapeCapture::new(),
            custom_shape: None,
            drawing: false,
            autofire: AutoFire::new(
                config.auto_fire,
                config.autofire_min_ms,
                config.autofire_max_ms,
            ),
            particle_physics: config.particle_physics(),
            rocket_physics: config.rocket_physics(),
            star_density: config.star_density,
            events: Vec::new(),
            rng,
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PointerDown(p) if self.drawing => self.capture.pointer_down(p),
            Command::PointerMove(p) if self.drawing => self.capture.pointer_move(p),
            Command::PointerUp if self.drawing => self.capture.pointer_up(),
            Command::PointerDown(_) | Command::PointerMove(_) | Command::PointerUp => {}
            Command::Launch { target, pattern } => {
                let origin = Vec2::new(self.viewport.x / 2.0, self.viewport.y);
                self.launch(origin, target, pattern);
            }
            Command::TriggerFinale => self.trigger_finale(),
            Command::ClearDrawing => self.capture.clear(),
            Command::ConfirmDrawing => match self.capture.captured_shape() {
                Some(shape) => {
                    self.capture.clear();
                    self.commit_shape(shape);
                }
                None => {
                    let points = self.capture.point_count();
                    tracing::debug!(points, "not enough points for a shape")
                }
            },
            Command::CommitText(text) => match CustomShape::from_text(&text) {
                Some(shape) => self.commit_shape(shape),
                None => tracing::debug!(text, "text produced no shape"),
            },
            Command::SetCustomShape(shape) => self.custom_shape = shape,
            Command::SetDrawing(on) => {
                self.drawing = on;
                if !on {
                    self.capture.pointer_up();
                }
            }
            Command::SetAutoFire(on) => self.autofire.set_enabled(on),
            Command::Resize(viewport) => self.resize(viewport),
        }
    }

    /// Launches toward `target`; non-finite coordinates are ignored.
    pub fn launch(&mut self, origin: Vec2, target: Vec2, pattern: PatternType) {
        if !origin.is_finite() || !target.is_finite() {
            tracing::debug!(?origin, ?target, "ignoring launch with non-finite coordinates");
            return;
        }
        let speed = self.rocket_physics.start_speed;
        self.projectiles.push(Projectile::launch(origin, target, pattern, speed));
    }

    pub fn trigger_finale(&mut self) {
        let shells = finale_shells(self.viewport, &mut self.rng);
        let count = shells.len();
        self.projectiles.extend(shells);
        tracing::info!(count, "finale launched");
        self.events.push(SimEvent::FinaleLaunched { count });
    }

    fn commit_shape(&mut self, shape: CustomShape) {
        let points = shape.len();
        self.custom_shape = Some(shape);
        tracing::info!(points, "custom shape committed");
        self.events.push(SimEvent::ShapeCompleted { points });
    }

    /// Full reset of everything sized to the viewport. The custom shape and
    /// stroke buffers survive.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.projectiles.clear();
        self.particles.clear();
        self.stars = star_field(viewport, self.star_density, &mut self.rng);
        tracing::info!(width = viewport.x, height = viewport.y, "viewport reset");
    }

    /// One update pass: auto-fire, rockets (arrivals become particles in the
    /// same pass), particles, stars.
    pub fn step(&mut self, dt_ms: f64) {
        self.clock_ms += dt_ms;
        self.hue = (self.hue + HUE_DRIFT) % 360.0;

        let drawing = self.drawing || self.capture.is_drawing();
        let auto = self.autofire.tick(self.clock_ms, drawing, self.viewport, &mut self.rng);
        if let Some(auto) = auto {
            self.launch(auto.origin, auto.target, auto.pattern);
        }

        for det in projectile::step_all(&mut self.projectiles, &self.rocket_physics) {
            let shape = self.custom_shape.as_ref();
            let batch = patterns::generate(det.pos, det.pattern, det.color, shape, &mut self.rng);
            let particles = batch.len();
            let event = match det.color {
                Some(_) => SimEvent::ShellBurst { particles },
                None => {
                    tracing::debug!(pattern = %det.pattern, particles, "detonation");
                    SimEvent::Exploded { pattern: det.pattern, particles }
                }
            };
            self.events.push(event);
            self.particles.extend(batch);
        }

        particle::step_all(&mut self.particles, &self.particle_physics, &mut self.rng);

        for star in &mut self.stars {
            star.step();
        }
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Normalized freehand capture so far, `None` under five points.
    /// Leaves the buffers untouched.
    pub fn captured_shape(&self) -> Option<CustomShape> {
        self.capture.captured_shape()
    }

    pub fn custom_shape(&self) -> Option<&CustomShape> {
        self.custom_shape.as_ref()
    }

    pub fn capture(&self) -> &ShapeCapture {
        &self.capture
    }

    /// Finished strokes, without the one still being drawn.
    pub fn strokes(&self) -> &[Vec<Vec2>] {
        self.capture.strokes()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn auto_fire_enabled(&self) -> bool {
        self.autofire.enabled
    }
}
