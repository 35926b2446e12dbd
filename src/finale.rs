use crate::color::Paint;
use crate::geometry::random_range;
use crate::projectile::Projectile;
use fastrand::Rng;
use glam::Vec2;
use std::f32::consts::PI;

pub const FINALE_SHELLS: usize = 60;

/// Blue through violet, in fan order.
pub const FINALE_BANDS: [&str; 7] = [
    "hsl(220, 100%, 60%)",
    "hsl(185, 100%, 55%)",
    "hsl(120, 100%, 55%)",
    "hsl(55, 100%, 55%)",
    "hsl(0, 100%, 60%)",
    "hsl(300, 100%, 60%)",
    "hsl(275, 100%, 65%)",
];

/// Angular margin left on each side of the half-circle.
const FAN_MARGIN: f32 = 0.1;
const TRAIL_WIDTH: f32 = 2.0;

pub fn band_colors() -> Vec<Paint> {
    FINALE_BANDS.iter().filter_map(|s| s.parse().ok()).collect()
}

/// Band index for the shell at `index` of `count`.
pub fn band_of(index: usize, count: usize, bands: usize) -> usize {
    (index * bands / count.max(1)).min(bands.saturating_sub(1))
}

/// Every shell leaves bottom-center at once, fanned left to right over just
/// under a half-circle.
pub fn finale_shells(viewport: Vec2, rng: &mut Rng) -> Vec<Projectile> {
    let colors = band_colors();
    let origin = Vec2::new(viewport.x / 2.0, viewport.y);
    let start = -PI + FAN_MARGIN;
    let span = PI - 2.0 * FAN_MARGIN;
    let reach = viewport.y * 0.75;

    (0..FINALE_SHELLS)
        .map(|i| {
            let angle = start + span * i as f32 / (FINALE_SHELLS - 1) as f32;
            let color = colors[band_of(i, FINALE_SHELLS, colors.len())];
            let speed = random_range(rng, 9.0, 11.0);
            Projectile::shell(origin, angle, speed, reach, color, TRAIL_WIDTH)
        })
        .collect()
}
