//! Cached soft-dot texture stamped for every star.

use starfield_core::{Circle, Size};
use vello_cpu::peniko::{Color, Gradient};

use crate::pixmap::Pixmap;
use crate::surface::Surface;

/// Side length of the star sprite in pixels.
pub const SPRITE_SIZE: u32 = 100;

/// Build the white radial dot used for every star.
///
/// Rendered once per animator; stars only scale and fade it.
pub fn star_sprite() -> Pixmap {
    let mut sprite = Pixmap::new(Size::new(SPRITE_SIZE, SPRITE_SIZE));
    let half = f64::from(SPRITE_SIZE) / 2.0;
    let glow = Gradient::new_radial((half, half), half as f32).with_stops([
        (0.02, Color::WHITE),
        (0.15, Color::WHITE),
        (0.35, Color::WHITE.with_alpha(0.15)),
        (1.0, Color::TRANSPARENT),
    ]);
    sprite.fill_circle(Circle::new((half, half), half), &glow);
    sprite.flush();
    sprite
}
