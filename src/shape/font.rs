//! Text rasterization for the drone display.

use glam::Vec2;
use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};
use std::sync::OnceLock;

// DejaVu Sans Bold, see assets/DejaVuSans-LICENSE
const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");

pub const PADDING: u32 = 20; // blank border around the measured text box
pub const SAMPLE_STRIDE: usize = 6;
pub const INK_THRESHOLD: u8 = 128; // red channel, strictly above

const FONT_SIZE: f32 = 100.0;
const SMALL_FONT_SIZE: f32 = 64.0; // keeps long strings from sampling too sparsely
const LONG_TEXT: usize = 10;

fn font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| Font::try_from_bytes(FONT_DATA)).as_ref()
}

pub fn font_size(char_count: usize) -> f32 {
    if char_count > LONG_TEXT { SMALL_FONT_SIZE } else { FONT_SIZE }
}

/// Draws `text` white-on-black onto a raster sized to its measured advance
/// width and line height plus padding. `None` for blank input.
pub fn rasterize(text: &str) -> Option<RgbImage> {
    let text = text.trim().to_uppercase();
    if text.is_empty() {
        return None;
    }
    let font = font()?;
    let scale = Scale::uniform(font_size(text.chars().count()));
    let v_metrics = font.v_metrics(scale);

    let origin = point(PADDING as f32, PADDING as f32 + v_metrics.ascent);
    let glyphs: Vec<_> = font.layout(&text, scale, origin).collect();

    // Measure the text box
    let text_width = glyphs.last().map_or(0.0, |g| {
        g.position().x - origin.x + g.unpositioned().h_metrics().advance_width
    });
    let text_height = v_metrics.ascent - v_metrics.descent;
    let width = text_width.ceil().max(1.0) as u32 + PADDING * 2;
    let height = text_height.ceil().max(1.0) as u32 + PADDING * 2;
    let mut img = RgbImage::new(width, height);

    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32;
            let y = bb.min.y + gy as i32;
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                return;
            }
            let v = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            let px = img.get_pixel_mut(x as u32, y as u32);
            // Overlapping glyphs keep the stronger coverage
            if v > px.0[0] {
                *px = Rgb([v, v, v]);
            }
        });
    }

    Some(img)
}

/// Scans the raster on a fixed stride and keeps every inked sample.
pub fn sample_ink(img: &RgbImage) -> Vec<Vec2> {
    let mut points = Vec::new();
    for y in (0..img.height()).step_by(SAMPLE_STRIDE) {
        for x in (0..img.width()).step_by(SAMPLE_STRIDE) {
            if img.get_pixel(x, y).0[0] > INK_THRESHOLD {
                points.push(Vec2::new(x as f32, y as f32));
            }
        }
    }
    points
}

pub fn text_points(text: &str) -> Vec<Vec2> {
    rasterize(text).map(|img| sample_ink(&img)).unwrap_or_default()
}
