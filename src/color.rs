use crate::error::ColorError;
use lightningcss::traits::Parse;
use lightningcss::values::color::{CssColor, FloatColor};
use std::str::FromStr;

pub type Rgb = (u8, u8, u8);

/// How a color's alpha reaches the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// `"r, g, b"` triplets carry the particle alpha in the color itself.
    PerColor,
    /// `rgb()`, `hsl()` and hex colors are opaque; alpha goes through the
    /// canvas global alpha instead.
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub rgb: Rgb,
    pub mode: AlphaMode,
}

impl Paint {
    pub const fn triplet(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: (r, g, b), mode: AlphaMode::PerColor }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: (r, g, b), mode: AlphaMode::Global }
    }

    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self::opaque(r, g, b)
    }
}

impl FromStr for Paint {
    type Err = ColorError;

    /// A bare `"r, g, b"` triplet keeps per-color alpha; every CSS form
    /// (`rgb()`, `hsl()`, hex, named) is opaque.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rgb) = parse_triplet(s)? {
            let (r, g, b) = rgb;
            return Ok(Paint::triplet(r, g, b));
        }
        let (r, g, b) = parse_css_color(s)?;
        Ok(Paint::opaque(r, g, b))
    }
}

/// `Ok(None)` when `s` is not three comma-separated numbers.
fn parse_triplet(s: &str) -> Result<Option<Rgb>, ColorError> {
    let parts: Vec<f32> = match s.split(',').map(|p| p.trim().parse::<f32>()).collect() {
        Ok(parts) => parts,
        Err(_) => return Ok(None),
    };
    let [r, g, b] = parts[..] else {
        return Ok(None);
    };
    let channel = |v: f32| {
        if (0.0..=255.0).contains(&v) {
            Ok(v.round() as u8)
        } else {
            Err(ColorError::Range(s.to_string()))
        }
    };
    Ok(Some((channel(r)?, channel(g)?, channel(b)?)))
}

// Alpha in rgba()/hsla() is dropped; the particle alpha drives fading.
fn parse_css_color(s: &str) -> Result<Rgb, ColorError> {
    let css = CssColor::parse_string(s).map_err(|_| ColorError::Syntax(s.to_string()))?;
    match css.to_rgb().map_err(|_| ColorError::Syntax(s.to_string()))? {
        CssColor::RGBA(rgba) => Ok((rgba.red, rgba.green, rgba.blue)),
        CssColor::Float(float) => match float.as_ref() {
            FloatColor::RGB(rgb) => {
                let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                Ok((channel(rgb.r), channel(rgb.g), channel(rgb.b)))
            }
            _ => Err(ColorError::Syntax(s.to_string())),
        },
        _ => Err(ColorError::Syntax(s.to_string())),
    }
}

/// Parses `RRGGBB` or `RGB` (no leading `#`).
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

/// `h` in degrees, `s` and `l` in `[0, 1]`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let hue = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    (
        (hue(h + 1.0 / 3.0) * 255.0).round() as u8,
        (hue(h) * 255.0).round() as u8,
        (hue(h - 1.0 / 3.0) * 255.0).round() as u8,
    )
}
