//! Orbiting, twinkling stars.

use rand::Rng;
use starfield_core::{Point, Size, StarfieldConfig};

use super::random_int;

/// Opacity change applied by a single twinkle.
pub const TWINKLE_STEP: f64 = 0.05;

/// Twinkle roll that dims a star.
const DIM_ROLL: i64 = 1;

/// Twinkle roll that brightens a star.
const BRIGHTEN_ROLL: i64 = 2;

/// Lower bound of the radius draw, keeps small orbits from shrinking to nothing.
const RADIUS_FLOOR: i64 = 60;

/// Smallest drawn star side in pixels.
const MIN_RADIUS: f64 = 0.5;

/// A point of light circling the scene center.
#[derive(Debug, Clone)]
pub struct Star {
    /// Distance from the scene center.
    pub orbit_radius: f64,
    /// Side length of the stamped sprite.
    pub radius: f64,
    /// Orbit center x.
    pub center_x: f64,
    /// Orbit center y.
    pub center_y: f64,
    /// Accumulated angle in radians.
    pub phase: f64,
    /// Angle added per unpaused frame.
    pub speed: f64,
    /// Current opacity in `0.0..=1.0`.
    pub alpha: f64,
}

/// Radius of a circle large enough to cover the surface diagonal.
pub fn max_orbit(size: Size) -> f64 {
    let max = size.max_dimension() as f64;
    (std::f64::consts::SQRT_2 * max).ceil() / 2.0
}

impl Star {
    /// Create a star for a surface of `size`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, size: Size, config: &StarfieldConfig) -> Self {
        let orbit_radius = random_int(rng, 0, max_orbit(size).floor() as i64);
        let radius = (random_int(rng, RADIUS_FLOOR, orbit_radius as i64) / 12.0).max(MIN_RADIUS);
        let phase = random_int(rng, 0, i64::from(config.max_stars));
        let speed = random_int(rng, 0, orbit_radius as i64) / 50_000.0
            * f64::from(config.speed_multiplier);
        let alpha = (random_int(rng, 2, 10) / 10.0 * f64::from(config.brightness)).clamp(0.0, 1.0);

        Self {
            orbit_radius,
            radius,
            center_x: f64::from(size.width) / 2.0,
            center_y: f64::from(size.height) / 2.0,
            phase,
            speed,
            alpha,
        }
    }

    /// Current screen position.
    pub fn position(&self) -> Point {
        Point::new(
            self.phase.sin() * self.orbit_radius + self.center_x,
            self.phase.cos() * self.orbit_radius + self.center_y,
        )
    }

    /// Top-left corner of the sprite square centred on the star.
    pub fn sprite_origin(&self) -> Point {
        let p = self.position();
        let half = self.radius / 2.0;
        Point::new(p.x - half, p.y - half)
    }

    /// Apply one twinkle roll; the result always stays within `0.0..=1.0`.
    pub fn twinkle(&mut self, roll: i64) {
        match roll {
            DIM_ROLL if self.alpha > 0.0 => self.alpha -= TWINKLE_STEP,
            BRIGHTEN_ROLL if self.alpha < 1.0 => self.alpha += TWINKLE_STEP,
            _ => {}
        }
        self.alpha = self.alpha.clamp(0.0, 1.0);
    }

    /// Move one frame along the orbit.
    pub fn advance(&mut self) {
        self.phase += self.speed;
    }

    /// Re-anchor on a resized surface, scaling the orbit with the covering circle.
    pub fn refit(&mut self, old: Size, new: Size) {
        let old_orbit = max_orbit(old);
        let new_orbit = max_orbit(new);
        if old_orbit > 0.0 {
            self.orbit_radius = (self.orbit_radius * new_orbit / old_orbit).min(new_orbit);
        }
        self.center_x = f64::from(new.width) / 2.0;
        self.center_y = f64::from(new.height) / 2.0;
    }
}

/// Create `config.max_stars` stars for a surface of `size`.
pub fn init_stars<R: Rng + ?Sized>(rng: &mut R, size: Size, config: &StarfieldConfig) -> Vec<Star> {
    (0..config.max_stars)
        .map(|_| Star::new(rng, size, config))
        .collect()
}

/// Draw the twinkle roll for one star this frame.
pub fn twinkle_roll<R: Rng + ?Sized>(rng: &mut R, intensity: u32) -> i64 {
    random_int(rng, 0, i64::from(intensity)) as i64
}
