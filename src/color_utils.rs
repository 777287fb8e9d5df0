//! Color helpers for label presentation attributes.
//!
//! Labels carry plain RGB triples. This module converts them to and from
//! `#rrggbb` strings, derives the light background and dark foreground used
//! for highlighted spans, and generates accent colors for labels that were
//! defined without one.

/// An RGB color with 8 bits per channel.
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];

/// Hue step between generated label colors, in degrees.
const GOLDEN_ANGLE: f32 = 137.5;

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Accent color for the `index`-th generated label.
///
/// Successive indices are spread around the hue wheel by the golden angle so
/// that neighbouring labels stay easy to tell apart.
pub fn generated_color(index: usize) -> Rgb {
    let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    [channel(r), channel(g), channel(b)]
}

/// Linear blend from `from` towards `to`; `t = 0.0` keeps `from`.
pub fn mix(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for ((slot, a), b) in out.iter_mut().zip(from).zip(to) {
        let (a, b) = (f32::from(a), f32::from(b));
        *slot = (a + (b - a) * t).round() as u8;
    }
    out
}

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(out)
}

/// Format as lowercase `#rrggbb`.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
