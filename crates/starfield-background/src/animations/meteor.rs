//! Rare shooting stars.

use rand::Rng;
use starfield_core::{Line, Point};
use vello_cpu::peniko::{Color, Gradient};

use crate::color::METEOR_BLUE;

/// Spawn height above the top edge.
const SPAWN_Y: f64 = -50.0;

/// How far below the bottom edge a meteor may fall before it is dropped.
const EXIT_MARGIN: f64 = 60.0;

/// Opacity lost per frame.
pub const OPACITY_DECAY: f64 = 0.008;

/// Opacity at spawn.
pub const INITIAL_OPACITY: f64 = 0.9;

/// Stroke width of the streak.
pub const STREAK_WIDTH: f64 = 2.0;

/// A streak falling diagonally and fading out.
#[derive(Debug, Clone)]
pub struct Meteor {
    /// Head x position.
    pub x: f64,
    /// Head y position.
    pub y: f64,
    /// Tail length in pixels.
    pub length: f64,
    /// Distance travelled per frame.
    pub speed: f64,
    /// Direction of travel in radians.
    pub angle: f64,
    /// Current opacity.
    pub opacity: f64,
    /// Cleared once faded out or off screen.
    pub active: bool,
}

impl Meteor {
    /// Spawn a meteor above the top edge of a surface `width` pixels wide.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: u32) -> Self {
        Self {
            x: rng.r#gen::<f64>() * f64::from(width),
            y: SPAWN_Y,
            length: rng.r#gen::<f64>() * 70.0 + 40.0,
            speed: rng.r#gen::<f64>() * 6.0 + 3.0,
            angle: std::f64::consts::FRAC_PI_4 + rng.r#gen::<f64>() * 0.4,
            opacity: INITIAL_OPACITY,
            active: true,
        }
    }

    /// Move one frame and fade; deactivates past the bottom of a surface
    /// `height` pixels tall or once fully faded.
    pub fn update(&mut self, height: u32) {
        if !self.active {
            return;
        }
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed;
        self.opacity -= OPACITY_DECAY;
        if self.opacity <= 0.0 || self.y > f64::from(height) + EXIT_MARGIN {
            self.active = false;
        }
    }

    pub fn head(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// End of the streak, `length` pixels back along the direction of travel.
    pub fn tail(&self) -> Point {
        Point::new(
            self.x - self.angle.cos() * self.length,
            self.y - self.angle.sin() * self.length,
        )
    }

    pub fn line(&self) -> Line {
        Line::new(self.head(), self.tail())
    }

    /// Head-to-tail fade from white through pale blue to nothing.
    pub fn streak(&self) -> Gradient {
        let opacity = self.opacity.clamp(0.0, 1.0) as f32;
        let (head, tail) = (self.head(), self.tail());
        Gradient::new_linear((head.x, head.y), (tail.x, tail.y)).with_stops([
            (0.0, Color::WHITE.with_alpha(opacity)),
            (0.5, METEOR_BLUE.with_alpha(opacity * 0.6)),
            (1.0, Color::WHITE.with_alpha(0.0)),
        ])
    }
}
