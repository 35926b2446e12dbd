use crate::color::Rgb;
use glam::Vec2;
use std::io::Write;

/// Pixel surface for a terminal drawn with lower half-blocks: every cell
/// carries two pixels stacked vertically.
pub struct Canvas {
    width: usize,
    height: usize,
    bg: Rgb,
    global_alpha: f32,
    pixels: Vec<(f32, f32, f32)>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, bg: Rgb) -> Self {
        let fill = (bg.0 as f32, bg.1 as f32, bg.2 as f32);
        Self { width, height, bg, global_alpha: 1.0, pixels: vec![fill; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bg(&self) -> Rgb {
        self.bg
    }

    pub fn clear(&mut self) {
        let fill = (self.bg.0 as f32, self.bg.1 as f32, self.bg.2 as f32);
        self.pixels.fill(fill);
        self.global_alpha = 1.0;
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let (r, g, b) = self.pixels[y * self.width + x];
        (r.round() as u8, g.round() as u8, b.round() as u8)
    }

    /// Source-over blend of one pixel. Out-of-bounds writes are dropped.
    pub fn plot(&mut self, x: i32, y: i32, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = (alpha * self.global_alpha).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = &mut self.pixels[y as usize * self.width + x as usize];
        px.0 += (color.0 as f32 - px.0) * a;
        px.1 += (color.1 as f32 - px.1) * a;
        px.2 += (color.2 as f32 - px.2) * a;
    }

    fn dab(&mut self, p: Vec2, color: Rgb, alpha: f32, width: f32) {
        let x = p.x.floor() as i32;
        let y = p.y.floor() as i32;
        if width <= 1.0 {
            self.plot(x, y, color, alpha);
            return;
        }
        let r = (width / 2.0).ceil() as i32;
        for dy in -r + 1..r {
            for dx in -r + 1..r {
                self.plot(x + dx, y + dy, color, alpha);
            }
        }
    }

    /// Straight segment, one sample per pixel along the major axis. Only the
    /// part near the canvas is sampled.
    pub fn line(&mut self, a: Vec2, b: Vec2, color: Rgb, alpha: f32, width: f32) {
        let margin = Vec2::splat(width.max(1.0) / 2.0 + 1.0);
        let hi = Vec2::new(self.width as f32, self.height as f32) + margin;
        let Some((a, b)) = clip_segment(a, b, -margin, hi) else {
            return;
        };
        let delta = b - a;
        let steps = delta.abs().max_element().ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = a + delta * (i as f32 / steps as f32);
            self.dab(p, color, alpha, width);
        }
    }

    pub fn polyline(
        &mut self,
        points: impl IntoIterator<Item = Vec2>,
        color: Rgb,
        alpha: f32,
        width: f32,
    ) {
        let mut it = points.into_iter();
        let Some(mut prev) = it.next() else {
            return;
        };
        let mut single = true;
        for p in it {
            self.line(prev, p, color, alpha, width);
            prev = p;
            single = false;
        }
        if single {
            self.dab(prev, color, alpha, width);
        }
    }

    /// Filled disc. Anything smaller than a pixel still lights one pixel.
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32) {
        if radius <= 0.5 {
            self.plot(center.x.floor() as i32, center.y.floor() as i32, color, alpha);
            return;
        }
        let r = radius.ceil() as i32;
        let (cx, cy) = (center.x.floor() as i32, center.y.floor() as i32);
        for dy in -r..=r {
            for dx in -r..=r {
                let d = Vec2::new(dx as f32, dy as f32);
                if d.length_squared() <= radius * radius {
                    self.plot(cx + dx, cy + dy, color, alpha);
                }
            }
        }
    }

    /// Heart silhouette of half-width `radius`, filled with `color` and
    /// rimmed with `outline`.
    pub fn fill_heart(&mut self, center: Vec2, radius: f32, color: Rgb, outline: Rgb, alpha: f32) {
        let radius = radius.max(1.0);
        let inside = |dx: i32, dy: i32| {
            let u = dx as f32 / radius;
            let v = -dy as f32 / radius + 0.2;
            let k = u * u + v * v - 1.0;
            k * k * k - u * u * v * v * v <= 0.0
        };

        let r = (radius * 1.3).ceil() as i32;
        let (cx, cy) = (center.x.floor() as i32, center.y.floor() as i32);
        for dy in -r..=r {
            for dx in -r..=r {
                if !inside(dx, dy) {
                    continue;
                }
                let edge = !inside(dx - 1, dy)
                    || !inside(dx + 1, dy)
                    || !inside(dx, dy - 1)
                    || !inside(dx, dy + 1);
                let c = if edge && radius >= 2.0 { outline } else { color };
                self.plot(cx + dx, cy + dy, c, alpha);
            }
        }
    }

    /// Emits the frame as half-block cells, only switching colors when they
    /// change along a row.
    pub fn write_to(&self, out: &mut Vec<u8>) -> std::io::Result<()> {
        out.extend_from_slice(b"\x1b[H");

        for y in (0..self.height).step_by(2) {
            let mut prev_top: Option<Rgb> = None;
            let mut prev_bot: Option<Rgb> = None;

            for x in 0..self.width {
                let top = self.pixel(x, y);
                let bot = if y + 1 < self.height { self.pixel(x, y + 1) } else { top };

                if prev_top != Some(top) {
                    write!(out, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(out, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }
                out.extend_from_slice("\u{2584}".as_bytes());
            }
            out.extend_from_slice(b"\x1b[0m");
            if y + 2 < self.height {
                out.extend_from_slice(b"\r\n");
            }
        }
        Ok(())
    }
}

/// Liang-Barsky clip of segment `a..b` to the box `lo..hi`.
fn clip_segment(a: Vec2, b: Vec2, lo: Vec2, hi: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in [
        (-d.x, a.x - lo.x),
        (d.x, hi.x - a.x),
        (-d.y, a.y - lo.y),
        (d.y, hi.y - a.y),
    ] {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}
