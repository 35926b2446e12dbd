//! Draws one frame of a [`Simulation`] onto a [`Canvas`].

use crate::color::{AlphaMode, Paint};
use crate::particle::{Particle, ParticleShape};
use crate::projectile::Projectile;
use crate::sim::Simulation;
use glam::Vec2;

mod canvas;

pub use canvas::Canvas;

const STROKE_COLOR: (u8, u8, u8) = (255, 255, 255);
const STROKE_ALPHA: f32 = 0.7;
const HEART_RIM: (u8, u8, u8) = (255, 240, 245);
const STAR_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Triplet colors carry the alpha themselves; every other form is opaque and
/// fades through the canvas global alpha.
fn with_paint(canvas: &mut Canvas, paint: Paint, alpha: f32, draw: impl FnOnce(&mut Canvas, f32)) {
    match paint.mode {
        AlphaMode::PerColor => draw(canvas, alpha),
        AlphaMode::Global => {
            canvas.set_global_alpha(alpha);
            draw(canvas, 1.0);
            canvas.set_global_alpha(1.0);
        }
    }
}

/// Maps simulation units onto canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub scale: f32,
}

impl View {
    #[inline]
    fn px(&self, p: Vec2) -> Vec2 {
        p / self.scale
    }

    #[inline]
    fn len(&self, l: f32) -> f32 {
        l / self.scale
    }
}

/// Clear, then stars, rockets, particles, and finally any strokes being drawn.
pub fn draw_frame(sim: &Simulation, canvas: &mut Canvas, view: View) {
    canvas.clear();

    for star in sim.stars() {
        let alpha = star.opacity.clamp(0.0, 1.0) * 0.6;
        canvas.fill_disc(view.px(star.pos), view.len(star.radius), STAR_COLOR, alpha);
    }

    for rocket in sim.projectiles() {
        draw_projectile(canvas, view, rocket, sim.hue());
    }

    for particle in sim.particles() {
        draw_particle(canvas, view, particle);
    }

    if sim.is_drawing() {
        let capture = sim.capture();
        let strokes = capture.strokes().iter().map(Vec::as_slice).chain(capture.active());
        for stroke in strokes {
            canvas.polyline(stroke.iter().map(|p| view.px(*p)), STROKE_COLOR, STROKE_ALPHA, 1.0);
        }
    }
}

fn draw_projectile(canvas: &mut Canvas, view: View, rocket: &Projectile, hue: f32) {
    let stroke = rocket.stroke(hue);
    let (from, to) = (view.px(rocket.oldest()), view.px(rocket.pos));
    with_paint(canvas, stroke.color, stroke.alpha, |c, a| {
        c.line(from, to, stroke.color.rgb, a, stroke.width);
    });
}

fn draw_particle(canvas: &mut Canvas, view: View, p: &Particle) {
    let alpha = p.alpha.clamp(0.0, 1.0);
    let rgb = p.color.rgb;

    // Trailing particles are drawn as their trail alone.
    if let Some(trail) = &p.trail {
        let width = (view.len(p.size) * 1.5).max(1.0);
        with_paint(canvas, p.color, alpha, |c, a| {
            c.polyline(trail.points().map(|q| view.px(q)), rgb, a, width);
        });
        return;
    }

    let center = view.px(p.pos);
    match p.shape {
        ParticleShape::Heart => {
            let radius = (view.len(p.size) * 1.5).max(1.5);
            with_paint(canvas, p.color, alpha, |c, a| {
                c.fill_heart(center, radius, rgb, HEART_RIM, a)
            });
        }
        ParticleShape::Dot => {
            let radius = view.len(p.size) / 2.0;
            with_paint(canvas, p.color, alpha, |c, a| c.fill_disc(center, radius, rgb, a));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::Command;

    const BG: (u8, u8, u8) = (0, 0, 0);

    fn quiet_sim() -> Simulation {
        let config = SimConfig { seed: Some(1), star_density: 0.0, ..SimConfig::default() };
        Simulation::new(Vec2::new(40.0, 40.0), &config)
    }

    fn lit(canvas: &Canvas) -> usize {
        (0..canvas.height())
            .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != BG)
            .count()
    }

    #[test]
    fn empty_sky_stays_dark() {
        let sim = quiet_sim();
        let mut canvas = Canvas::new(10, 10, BG);
        draw_frame(&sim, &mut canvas, View { scale: 4.0 });
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn rocket_draws_its_trail_segment() {
        let mut sim = quiet_sim();
        let pattern = crate::patterns::PatternType::Heart;
        sim.apply(Command::Launch { target: Vec2::new(20.0, 0.0), pattern });
        sim.step(crate::sim::FRAME_MS);
        sim.step(crate::sim::FRAME_MS);

        let mut canvas = Canvas::new(10, 10, BG);
        draw_frame(&sim, &mut canvas, View { scale: 4.0 });
        assert!(lit(&canvas) > 0);
    }

    #[test]
    fn strokes_show_only_in_drawing_mode() {
        let mut sim = quiet_sim();
        sim.apply(Command::SetDrawing(true));
        sim.apply(Command::PointerDown(Vec2::new(4.0, 4.0)));
        sim.apply(Command::PointerMove(Vec2::new(30.0, 4.0)));

        let mut canvas = Canvas::new(10, 10, BG);
        draw_frame(&sim, &mut canvas, View { scale: 4.0 });
        let with_strokes = lit(&canvas);
        assert!(with_strokes >= 6);

        sim.apply(Command::SetDrawing(false));
        draw_frame(&sim, &mut canvas, View { scale: 4.0 });
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn opaque_colors_fade_through_global_alpha() {
        let mut a = Canvas::new(1, 1, BG);
        let mut b = Canvas::new(1, 1, BG);
        let rgb = (200, 100, 50);
        with_paint(&mut a, Paint::opaque(200, 100, 50), 0.5, |c, alpha| c.plot(0, 0, rgb, alpha));
        with_paint(&mut b, Paint::triplet(200, 100, 50), 0.5, |c, alpha| c.plot(0, 0, rgb, alpha));
        assert_eq!(a.pixel(0, 0), b.pixel(0, 0));
    }
}
