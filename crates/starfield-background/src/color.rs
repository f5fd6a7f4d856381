//! Palette and terminal color conversion for the starfield.

use ratatui::style::Color;
use vello_cpu::peniko::{self, color::PremulRgba8};

/// Center of the opaque background gradient.
pub const BACKGROUND_INNER: peniko::Color = peniko::Color::from_rgb8(10, 14, 23);

/// Edge of the opaque background gradient.
pub const BACKGROUND_OUTER: peniko::Color = peniko::Color::from_rgb8(1, 8, 20);

/// Mid-streak tint of a meteor trail.
pub const METEOR_BLUE: peniko::Color = peniko::Color::from_rgb8(147, 197, 253);

/// Terminal color for a premultiplied pixel, i.e. the pixel over black.
pub fn to_terminal_color(pixel: PremulRgba8) -> Color {
    Color::Rgb(pixel.r, pixel.g, pixel.b)
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
